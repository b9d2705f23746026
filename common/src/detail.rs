//! 学校詳細パネルのビューモデル
//!
//! 各行は `Option` で表し、値があれば表示・なければ行ごと非表示にする。
//! 行同士の判定は互いに独立。

use serde::Serialize;

use crate::endpoints::catchment_link;
use crate::types::SchoolDetail;

const DEFAULT_TYPE_BADGE: &str = "SCHOOL";
const NOT_AVAILABLE: &str = "N/A";
const SECTOR_BADGE_CLASS: &str = "sector-badge";

/// セクターバッジ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorBadge {
    pub text: String,
    /// 小文字化したセクター名（CSSクラス）。セクター不明なら None
    pub modifier: Option<String>,
}

impl SectorBadge {
    fn from_sector(sector: Option<&str>) -> Self {
        match sector {
            Some(sector) => Self {
                text: sector.to_string(),
                modifier: Some(
                    sector
                        .split_whitespace()
                        .collect::<Vec<_>>()
                        .join("-")
                        .to_lowercase(),
                ),
            },
            None => Self {
                text: NOT_AVAILABLE.to_string(),
                modifier: None,
            },
        }
    }

    /// 要素に付ける class 属性値（例: "sector-badge government"）
    pub fn class_name(&self) -> String {
        match &self.modifier {
            Some(modifier) => format!("{} {}", SECTOR_BADGE_CLASS, modifier),
            None => SECTOR_BADGE_CLASS.to_string(),
        }
    }
}

/// 詳細パネルに書き込む値一式
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub name: String,
    pub type_badge: String,
    pub year_levels: String,
    pub type_label: String,
    pub sector: SectorBadge,
    pub website: Option<String>,
    pub profile_url: Option<String>,
    pub naplan_url: Option<String>,
    pub icsea: Option<String>,
    /// "%" 付き
    pub icsea_percentile: Option<String>,
    /// 通学区域検索ページへのリンク
    pub catchment_link: Option<String>,
}

impl DetailView {
    pub fn from_detail(detail: &SchoolDetail) -> Self {
        let catchment = if detail.has_catchment_zone() {
            detail.school_id.as_deref().map(catchment_link)
        } else {
            None
        };

        Self {
            name: detail.school_name.clone(),
            type_badge: detail
                .school_type
                .clone()
                .unwrap_or_else(|| DEFAULT_TYPE_BADGE.to_string()),
            year_levels: detail
                .year_levels
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            type_label: detail
                .school_type_full
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            sector: SectorBadge::from_sector(detail.school_sector.as_deref()),
            website: detail.school_url.clone(),
            profile_url: detail.school_profile_url.clone(),
            naplan_url: detail.naplan_url.clone(),
            icsea: detail.icsea_score.clone(),
            icsea_percentile: detail.icsea_percentile.as_ref().map(|p| format!("{}%", p)),
            catchment_link: catchment,
        }
    }
}
