//! School Search Common Library
//!
//! ブラウザ(WASM)とCLIで共有される型・ビューモデル・検索セッション

pub mod types;
pub mod error;
pub mod parser;
pub mod endpoints;
pub mod geometry;
pub mod detail;
pub mod map;
pub mod view;
pub mod session;

pub use types::{InfoResponse, SchoolDetail, Suggestion};
pub use error::{Error, Result};
pub use parser::{parse_info_response, parse_suggestions};
pub use endpoints::{catchment_link, Endpoints};
pub use geometry::Bounds;
pub use detail::{DetailView, SectorBadge};
pub use map::{render_map, LatLng, MapSurface, MapView, MarkerPopup, PolygonStyle, Viewport};
pub use view::{SearchView, SuggestionRow};
pub use session::{
    AutocompleteOutcome, AutocompleteRequest, DetailOutcome, DetailRequest, Phase, RequestId,
    SearchSession,
};
