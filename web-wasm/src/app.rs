//! メインアプリケーションコンポーネント

use gloo::events::EventListener;
use leptos::prelude::*;
use leptos::task::spawn_local;
use school_search_common::{
    AutocompleteOutcome, DetailOutcome, DetailView, Endpoints, SearchSession, SearchView,
    SuggestionRow,
};

use crate::api::{fetch_school_info, fetch_suggestions};
use crate::components::{
    header::Header,
    loading_indicator::LoadingIndicator,
    map_panel::{MapPanel, MAP_SECTION_ID},
    school_info::SchoolInfo,
    search_form::{SearchForm, AUTOCOMPLETE_WRAPPER_SELECTOR},
};
use crate::dom;
use crate::map::{LeafletSurface, MAP_CONTAINER_ID};

/// ドロップダウンの中身
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SuggestionList {
    #[default]
    Empty,
    Rows(Vec<SuggestionRow>),
    NoResults,
}

/// SearchView をシグナルへの書き込みで実装
#[derive(Clone, Copy)]
pub struct SignalView {
    set_query: WriteSignal<String>,
    set_suggestions: WriteSignal<SuggestionList>,
    set_dropdown_open: WriteSignal<bool>,
    set_loading: WriteSignal<bool>,
    set_detail: WriteSignal<Option<DetailView>>,
    set_detail_visible: WriteSignal<bool>,
    set_map_visible: WriteSignal<bool>,
}

impl SearchView for SignalView {
    fn set_query_text(&mut self, text: &str) {
        self.set_query.set(text.to_string());
    }

    fn show_suggestions(&mut self, rows: &[SuggestionRow]) {
        self.set_suggestions.set(SuggestionList::Rows(rows.to_vec()));
        self.set_dropdown_open.set(true);
    }

    fn show_no_results(&mut self) {
        self.set_suggestions.set(SuggestionList::NoResults);
        self.set_dropdown_open.set(true);
    }

    fn hide_suggestions(&mut self) {
        self.set_dropdown_open.set(false);
    }

    fn clear_suggestions(&mut self) {
        self.set_suggestions.set(SuggestionList::Empty);
        self.set_dropdown_open.set(false);
    }

    fn alert(&mut self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn show_loading(&mut self) {
        self.set_loading.set(true);
        self.set_detail_visible.set(false);
        self.set_map_visible.set(false);
    }

    fn hide_loading(&mut self) {
        self.set_loading.set(false);
    }

    fn show_detail(&mut self, detail: &DetailView) {
        self.set_detail.set(Some(detail.clone()));
        self.set_detail_visible.set(true);
    }

    fn show_map(&mut self) {
        self.set_map_visible.set(true);
        dom::show_now(MAP_SECTION_ID, "block");
    }

    fn scroll_to_map(&mut self) {
        dom::scroll_into_view(MAP_SECTION_ID);
    }
}

fn log_autocomplete(outcome: &AutocompleteOutcome) {
    match outcome {
        AutocompleteOutcome::Failed(e) => {
            gloo::console::error!(format!("Error fetching schools: {}", e));
        }
        AutocompleteOutcome::Superseded => {
            gloo::console::debug!("autocomplete response superseded");
        }
        AutocompleteOutcome::Shown(_) | AutocompleteOutcome::NoResults => {}
    }
}

fn log_detail(outcome: &DetailOutcome) {
    match outcome {
        DetailOutcome::Failed(e) => {
            gloo::console::error!(format!("Error loading school data: {}", e));
        }
        DetailOutcome::MapFailed(e) => {
            gloo::console::error!(format!("Error drawing map: {}", e));
        }
        DetailOutcome::ServerError(message) => {
            gloo::console::debug!(format!("school info error: {}", message));
        }
        DetailOutcome::Superseded => {
            gloo::console::debug!("school info response superseded");
        }
        DetailOutcome::Displayed(_) => {}
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 表示状態
    let (query, set_query) = signal(String::new());
    let (suggestions, set_suggestions) = signal(SuggestionList::Empty);
    let (dropdown_open, set_dropdown_open) = signal(false);
    let (loading, set_loading) = signal(false);
    let (detail, set_detail) = signal(None::<DetailView>);
    let (detail_visible, set_detail_visible) = signal(false);
    let (map_visible, set_map_visible) = signal(false);

    let view = SignalView {
        set_query,
        set_suggestions,
        set_dropdown_open,
        set_loading,
        set_detail,
        set_detail_visible,
        set_map_visible,
    };

    // 検索セッションと地図（ページ内で1つずつ）
    let session = StoredValue::new(SearchSession::new(Endpoints::same_origin()));
    let surface = StoredValue::new_local(LeafletSurface::new(MAP_CONTAINER_ID));

    // 入力変更ハンドラ
    let on_input = move |text: String| {
        set_query.set(text.clone());

        let mut view = view;
        let mut pending = None;
        session.update_value(|s| pending = s.on_query_input(&mut view, &text));

        let Some(request) = pending else {
            return;
        };
        spawn_local(async move {
            let result = fetch_suggestions(&request.url).await;

            let mut view = view;
            let mut outcome = None;
            session.update_value(|s| outcome = Some(s.on_suggestions(&mut view, request.id, result)));
            if let Some(outcome) = outcome {
                log_autocomplete(&outcome);
            }
        });
    };

    // 州フィルタ変更ハンドラ
    let on_state_change = move |state: String| {
        session.update_value(|s| s.set_state_filter(Some(state)));
    };

    // 候補選択ハンドラ
    let on_pick = move |acara_id: String| {
        let mut view = view;
        session.update_value(|s| {
            s.select_suggestion(&mut view, &acara_id);
        });
    };

    // 送信ハンドラ
    let on_submit = move |_: ()| {
        let mut view = view;
        let mut pending = None;
        session.update_value(|s| pending = s.submit(&mut view));

        let Some(request) = pending else {
            return;
        };
        spawn_local(async move {
            let result = fetch_school_info(&request.url).await;

            let mut view = view;
            let mut outcome = None;
            session.update_value(|s| {
                surface.update_value(|map| {
                    outcome = Some(s.on_detail(&mut view, map, request.id, result));
                });
            });
            if let Some(outcome) = outcome {
                log_detail(&outcome);
            }
        });
    };

    // オートコンプリートの外側クリックで閉じる
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        EventListener::new(&document, "click", move |event| {
            if !dom::is_within(event.target(), AUTOCOMPLETE_WRAPPER_SELECTOR) {
                let mut view = view;
                session.update_value(|s| s.dismiss_suggestions(&mut view));
            }
        })
        .forget();
    }

    view! {
        <div class="container">
            <Header />

            <SearchForm
                query=query
                suggestions=suggestions
                dropdown_open=dropdown_open
                on_input=on_input
                on_state_change=on_state_change
                on_pick=on_pick
                on_submit=on_submit
            />

            <LoadingIndicator loading=loading />

            <SchoolInfo detail=detail visible=detail_visible />

            <MapPanel visible=map_visible />
        </div>
    }
}
