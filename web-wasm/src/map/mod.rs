//! 地図ウィジェット

pub mod leaflet;

pub use leaflet::LeafletSurface;

/// 地図をマウントする要素のID
pub const MAP_CONTAINER_ID: &str = "schoolMap";
