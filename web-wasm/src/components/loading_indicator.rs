//! 読み込み中表示コンポーネント

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator(loading: ReadSignal<bool>) -> impl IntoView {
    view! {
        <div
            id="loadingIndicator"
            class="loading-indicator"
            style:display=move || if loading.get() { "flex" } else { "none" }
        >
            <div class="spinner"></div>
            <p>"Loading school information..."</p>
        </div>
    }
}
