//! UIコンポーネント

pub mod header;
pub mod loading_indicator;
pub mod map_panel;
pub mod school_info;
pub mod search_form;
