//! DOMヘルパー

use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

pub fn element_by_id(id: &str) -> Option<Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

/// インラインスタイルで即座に表示する
///
/// Leafletは生成時にコンテナの大きさを測るので、
/// シグナル経由の反映を待たずに表示しておく必要がある。
pub fn show_now(id: &str, display: &str) {
    if let Some(element) = element_by_id(id).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
        let _ = element.style().set_property("display", display);
    }
}

/// 要素の先頭までスムーズスクロール
pub fn scroll_into_view(id: &str) {
    if let Some(element) = element_by_id(id) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// イベントの発生元が selector に一致する要素の内側か
pub fn is_within(target: Option<EventTarget>, selector: &str) -> bool {
    target
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|e| e.closest(selector).ok().flatten())
        .is_some()
}
