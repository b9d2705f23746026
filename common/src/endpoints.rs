//! APIエンドポイントのURL組み立て
//!
//! ブラウザでは同一オリジンの相対パス（ベースURL空）、
//! CLIでは設定されたベースURLを前置する。

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const AUTOCOMPLETE_PATH: &str = "/api/autocomplete/australia-schools";
pub const SCHOOL_INFO_PATH: &str = "/api/australia-school";
pub const CATCHMENT_SEARCH_PATH: &str = "/school-search";

/// `encodeURIComponent` と同じ非予約文字セット
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// 同一オリジン（相対パス）
    pub fn same_origin() -> Self {
        Self::default()
    }

    /// `GET /api/autocomplete/australia-schools?q=<query>[&state=<code>]`
    pub fn autocomplete_url(&self, query: &str, state: Option<&str>) -> String {
        let mut url = format!("{}{}?q={}", self.base_url, AUTOCOMPLETE_PATH, encode(query));
        if let Some(state) = state.filter(|s| !s.is_empty()) {
            url.push_str("&state=");
            url.push_str(&encode(state));
        }
        url
    }

    /// `GET /api/australia-school/{acara_sml_id}/info`
    pub fn info_url(&self, acara_id: &str) -> String {
        format!("{}{}/{}/info", self.base_url, SCHOOL_INFO_PATH, encode(acara_id))
    }

    /// 相対パスをベースURL付きの絶対URLにする（ブラウザでは相対のまま）
    pub fn resolve(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// 通学区域検索ページへのリンク（同一オリジン）
pub fn catchment_link(school_id: &str) -> String {
    format!("{}?school_id={}", CATCHMENT_SEARCH_PATH, encode(school_id))
}
