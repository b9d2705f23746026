//! APIレスポンスの型定義
//!
//! ブラウザ(WASM)とCLIで共有される型:
//! - Suggestion: オートコンプリート候補（1行分）
//! - SchoolDetail: 学校詳細（`/api/australia-school/{id}/info`）
//! - InfoResponse: 詳細APIの結果（アプリケーションエラー or 詳細）

use serde::{Deserialize, Serialize};

/// オートコンプリート候補
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// ACARA ID（数値・文字列どちらも受け付ける）
    #[serde(default, deserialize_with = "flex::text")]
    pub acara_sml_id: String,

    #[serde(default, deserialize_with = "flex::text")]
    pub school_name: String,

    #[serde(default, deserialize_with = "flex::opt_text")]
    pub state: Option<String>,

    #[serde(default, deserialize_with = "flex::opt_text")]
    pub school_sector: Option<String>,
}

/// 学校詳細
///
/// `school_name` 以外はすべて任意項目。値の有無がUIの行の表示/非表示を決める。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolDetail {
    #[serde(default, deserialize_with = "flex::text")]
    pub school_name: String,

    #[serde(default, deserialize_with = "flex::opt_text")]
    pub school_type: Option<String>,       // 種別コード（バッジ表示）

    #[serde(default, deserialize_with = "flex::opt_text")]
    pub school_type_full: Option<String>,  // 種別ラベル

    #[serde(default, deserialize_with = "flex::opt_text")]
    pub year_levels: Option<String>,       // 学年範囲

    #[serde(default, deserialize_with = "flex::opt_text")]
    pub school_sector: Option<String>,

    #[serde(default, deserialize_with = "flex::opt_text")]
    pub school_url: Option<String>,

    #[serde(default, deserialize_with = "flex::opt_text")]
    pub school_profile_url: Option<String>,

    #[serde(default, deserialize_with = "flex::opt_text")]
    pub naplan_url: Option<String>,

    #[serde(default, deserialize_with = "flex::opt_text")]
    pub icsea_score: Option<String>,

    #[serde(default, deserialize_with = "flex::opt_text")]
    pub icsea_percentile: Option<String>,

    /// 通学区域フラグ（'Y' のときのみ有効）
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub has_catchment: Option<String>,

    #[serde(default, deserialize_with = "flex::opt_text")]
    pub school_id: Option<String>,

    #[serde(default, deserialize_with = "flex::opt_f64")]
    pub latitude: Option<f64>,

    #[serde(default, deserialize_with = "flex::opt_f64")]
    pub longitude: Option<f64>,

    /// 5km圏バッファ（GeoJSONジオメトリ、そのまま地図に渡す）
    #[serde(default)]
    pub geom_5km_buffer: Option<serde_json::Value>,
}

impl SchoolDetail {
    /// 通学区域ボタンを出すかどうか
    pub fn has_catchment_zone(&self) -> bool {
        self.has_catchment.as_deref() == Some(CATCHMENT_FLAG) && self.school_id.is_some()
    }

    /// 緯度・経度が揃っている場合のみ座標を返す
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

/// `has_catchment` の肯定値
pub const CATCHMENT_FLAG: &str = "Y";

/// 詳細APIの結果
#[derive(Debug, Clone, PartialEq)]
pub enum InfoResponse {
    /// レスポンスに `error` フィールドが含まれていた
    Error(String),
    Detail(Box<SchoolDetail>),
}

/// 数値/文字列が混在するカラムのデシリアライズ
///
/// null・欠損・空文字列は「値なし」として扱う。
mod flex {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Bool(bool),
    }

    impl Raw {
        fn into_text(self) -> Option<String> {
            match self {
                Raw::Text(s) => {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                }
                Raw::Number(n) => Some(n.to_string()),
                Raw::Bool(b) => Some(b.to_string()),
            }
        }
    }

    pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Raw>::deserialize(deserializer)?.and_then(Raw::into_text))
    }

    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_text(deserializer)?.unwrap_or_default())
    }

    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Number(n)) => n.as_f64(),
            Some(Raw::Text(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(value.filter(|v| v.is_finite()))
    }
}
