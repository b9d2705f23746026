//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Australia School Search"</h1>
            <p class="text-muted">"Find a school, check its ICSEA and see its 5km zone"</p>
        </header>
    }
}
