//! 画面側のインターフェース
//!
//! セッションはDOMを直接触らず、この trait 経由で表示を更新する。

use serde::Serialize;

use crate::detail::DetailView;
use crate::types::Suggestion;

pub const NO_RESULTS_TEXT: &str = "No schools found";
pub const SELECT_SCHOOL_ALERT: &str = "Please select a school from the suggestions";
pub const LOAD_ERROR_ALERT: &str = "Error loading school information";

/// ドロップダウンの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRow {
    pub acara_id: String,
    pub name: String,
    /// "NSW - Government" 形式
    pub detail: String,
}

impl From<&Suggestion> for SuggestionRow {
    fn from(suggestion: &Suggestion) -> Self {
        let detail = [suggestion.state.as_deref(), suggestion.school_sector.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" - ");

        Self {
            acara_id: suggestion.acara_sml_id.clone(),
            name: suggestion.school_name.clone(),
            detail,
        }
    }
}

pub trait SearchView {
    /// 入力欄の文字列を置き換える
    fn set_query_text(&mut self, text: &str);

    /// 候補を表示（1件以上）
    fn show_suggestions(&mut self, rows: &[SuggestionRow]);

    /// 「該当なし」の1行だけを表示
    fn show_no_results(&mut self);

    /// ドロップダウンを閉じる（内容は残す）
    fn hide_suggestions(&mut self);

    /// 内容を消して閉じる
    fn clear_suggestions(&mut self);

    /// ブロッキングな通知
    fn alert(&mut self, message: &str);

    /// 読み込み中表示（詳細・地図セクションは隠す）
    fn show_loading(&mut self);

    fn hide_loading(&mut self);

    /// 詳細パネルを書き込んでから表示
    fn show_detail(&mut self, detail: &DetailView);

    /// 地図セクションを表示（地図の描画前に呼ばれる）
    fn show_map(&mut self);

    /// 地図セクションまでスクロール
    fn scroll_to_map(&mut self);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_detail_text() {
        let s = Suggestion {
            acara_sml_id: "1".into(),
            school_name: "A".into(),
            state: Some("NSW".into()),
            school_sector: Some("Government".into()),
        };
        assert_eq!(SuggestionRow::from(&s).detail, "NSW - Government");
    }

    #[test]
    fn test_row_detail_missing_sector() {
        let s = Suggestion {
            acara_sml_id: "1".into(),
            school_name: "A".into(),
            state: Some("QLD".into()),
            school_sector: None,
        };
        assert_eq!(SuggestionRow::from(&s).detail, "QLD");
    }
}
