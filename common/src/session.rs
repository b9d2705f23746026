//! 検索セッション
//!
//! オートコンプリート・候補選択・送信・詳細表示の流れを1つの状態として持つ。
//! 通信そのものは行わず、リクエスト（ID + URL）を返して、結果を受け取る。
//!
//! 状態遷移（検索1回分）:
//! Idle → Loading（送信）→ Displayed | Error
//!
//! リクエストには単調増加のIDを振り、最後に発行したもの以外の応答は捨てる。

use crate::detail::DetailView;
use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use crate::map::{render_map, MapSurface, MapView, Viewport};
use crate::types::{InfoResponse, Suggestion};
use crate::view::{SearchView, SuggestionRow, LOAD_ERROR_ALERT, SELECT_SCHOOL_ALERT};

/// 問い合わせを出す最小文字数（trim後）
pub const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// 発行済みリクエストの最新IDを管理
#[derive(Debug, Default)]
struct Sequencer {
    issued: u64,
}

impl Sequencer {
    fn next(&mut self) -> RequestId {
        self.issued += 1;
        RequestId(self.issued)
    }

    /// 応答待ちを無効化する
    fn supersede(&mut self) {
        self.issued += 1;
    }

    fn is_current(&self, id: RequestId) -> bool {
        id.0 == self.issued
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteRequest {
    pub id: RequestId,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub id: RequestId,
    pub acara_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Displayed,
    Error,
}

#[derive(Debug)]
pub enum AutocompleteOutcome {
    /// 候補を表示した（件数）
    Shown(usize),
    NoResults,
    /// 通信・パース失敗。表示は変更していない
    Failed(Error),
    /// 後続のリクエストがあるため捨てた
    Superseded,
}

#[derive(Debug)]
pub enum DetailOutcome {
    Displayed(Viewport),
    /// 詳細は表示したが地図描画に失敗した
    MapFailed(Error),
    /// レスポンスの `error` フィールド
    ServerError(String),
    Failed(Error),
    Superseded,
}

#[derive(Debug)]
pub struct SearchSession {
    endpoints: Endpoints,
    state_filter: Option<String>,
    suggestions: Vec<Suggestion>,
    selected: Option<String>,
    phase: Phase,
    autocomplete: Sequencer,
    detail: Sequencer,
}

impl SearchSession {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            state_filter: None,
            suggestions: Vec::new(),
            selected: None,
            phase: Phase::Idle,
            autocomplete: Sequencer::default(),
            detail: Sequencer::default(),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 選択中のACARA ID
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// 現在ドロップダウンに出ている候補
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn state_filter(&self) -> Option<&str> {
        self.state_filter.as_deref()
    }

    /// 州フィルタ（空文字列は「すべて」）
    pub fn set_state_filter(&mut self, state: Option<String>) {
        self.state_filter = state
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
    }

    /// 入力変更
    ///
    /// 3文字未満なら候補を消して None（通信しない）。
    /// それ以外は問い合わせリクエストを返す。
    pub fn on_query_input<V>(&mut self, view: &mut V, raw: &str) -> Option<AutocompleteRequest>
    where
        V: SearchView + ?Sized,
    {
        let query = raw.trim();

        if query.chars().count() < MIN_QUERY_CHARS {
            self.autocomplete.supersede();
            self.suggestions.clear();
            view.clear_suggestions();
            return None;
        }

        Some(AutocompleteRequest {
            id: self.autocomplete.next(),
            url: self
                .endpoints
                .autocomplete_url(query, self.state_filter.as_deref()),
        })
    }

    /// 候補の応答
    pub fn on_suggestions<V>(
        &mut self,
        view: &mut V,
        id: RequestId,
        result: Result<Vec<Suggestion>>,
    ) -> AutocompleteOutcome
    where
        V: SearchView + ?Sized,
    {
        if !self.autocomplete.is_current(id) {
            return AutocompleteOutcome::Superseded;
        }

        match result {
            Err(e) => AutocompleteOutcome::Failed(e),
            Ok(list) if list.is_empty() => {
                self.suggestions.clear();
                view.show_no_results();
                AutocompleteOutcome::NoResults
            }
            Ok(list) => {
                let rows: Vec<SuggestionRow> = list.iter().map(SuggestionRow::from).collect();
                view.show_suggestions(&rows);
                self.suggestions = list;
                AutocompleteOutcome::Shown(rows.len())
            }
        }
    }

    /// 候補をクリック
    ///
    /// 入力欄に学校名を入れ、ドロップダウンを閉じ、IDを記録する。
    /// 候補一覧はここで破棄する。
    pub fn select_suggestion<V>(&mut self, view: &mut V, acara_id: &str) -> Option<Suggestion>
    where
        V: SearchView + ?Sized,
    {
        let index = self
            .suggestions
            .iter()
            .position(|s| s.acara_sml_id == acara_id)?;

        let chosen = self.suggestions.swap_remove(index);
        self.suggestions.clear();
        // 応答待ちの候補は破棄
        self.autocomplete.supersede();

        view.set_query_text(&chosen.school_name);
        view.hide_suggestions();
        self.selected = Some(chosen.acara_sml_id.clone());
        Some(chosen)
    }

    /// 候補を経由せずにIDを選択済みにする（直リンク・CLI用）
    pub fn select_id(&mut self, acara_id: &str) {
        let id = acara_id.trim();
        self.selected = (!id.is_empty()).then(|| id.to_string());
    }

    /// オートコンプリート領域の外側がクリックされた
    pub fn dismiss_suggestions<V>(&mut self, view: &mut V)
    where
        V: SearchView + ?Sized,
    {
        view.hide_suggestions();
    }

    /// フォーム送信
    ///
    /// 未選択ならアラートを出して None（通信しない）。
    pub fn submit<V>(&mut self, view: &mut V) -> Option<DetailRequest>
    where
        V: SearchView + ?Sized,
    {
        let Some(acara_id) = self.selected.clone().filter(|id| !id.is_empty()) else {
            view.alert(SELECT_SCHOOL_ALERT);
            return None;
        };

        self.phase = Phase::Loading;
        view.show_loading();

        Some(DetailRequest {
            id: self.detail.next(),
            url: self.endpoints.info_url(&acara_id),
            acara_id,
        })
    }

    /// 詳細の応答
    ///
    /// 詳細パネル → 地図の順に描いてから読み込み表示を消す。
    pub fn on_detail<V, S>(
        &mut self,
        view: &mut V,
        surface: &mut S,
        id: RequestId,
        result: Result<InfoResponse>,
    ) -> DetailOutcome
    where
        V: SearchView + ?Sized,
        S: MapSurface + ?Sized,
    {
        if !self.detail.is_current(id) {
            return DetailOutcome::Superseded;
        }

        let detail = match result {
            Ok(InfoResponse::Detail(detail)) => detail,
            Ok(InfoResponse::Error(message)) => {
                view.alert(&message);
                view.hide_loading();
                self.phase = Phase::Error;
                return DetailOutcome::ServerError(message);
            }
            Err(e) => {
                view.alert(LOAD_ERROR_ALERT);
                view.hide_loading();
                self.phase = Phase::Error;
                return DetailOutcome::Failed(e);
            }
        };

        view.show_detail(&DetailView::from_detail(&detail));

        view.show_map();
        let rendered = render_map(surface, &MapView::from_detail(&detail));
        view.scroll_to_map();

        view.hide_loading();
        self.phase = Phase::Displayed;

        match rendered {
            Ok(viewport) => DetailOutcome::Displayed(viewport),
            Err(e) => DetailOutcome::MapFailed(e),
        }
    }
}
