//! 地図セクションコンポーネント
//!
//! 地図本体は LeafletSurface が `#schoolMap` に生成する。

use leptos::prelude::*;
use crate::map::MAP_CONTAINER_ID;

pub const MAP_SECTION_ID: &str = "mapSection";

#[component]
pub fn MapPanel(visible: ReadSignal<bool>) -> impl IntoView {
    view! {
        <section
            id=MAP_SECTION_ID
            class="map-section"
            style:display=move || if visible.get() { "block" } else { "none" }
        >
            <h2>"5km Zone"</h2>
            <div id=MAP_CONTAINER_ID class="school-map"></div>
        </section>
    }
}
