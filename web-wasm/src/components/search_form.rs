//! 検索フォームコンポーネント（州フィルタ + オートコンプリート）

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use school_search_common::view::NO_RESULTS_TEXT;

use crate::app::SuggestionList;

/// ドロップダウンを閉じない領域
pub const AUTOCOMPLETE_WRAPPER_SELECTOR: &str = ".autocomplete-wrapper";

/// 州フィルタの選択肢（値, 表示名）
const STATE_OPTIONS: [(&str, &str); 9] = [
    ("", "All states"),
    ("NSW", "New South Wales"),
    ("VIC", "Victoria"),
    ("QLD", "Queensland"),
    ("SA", "South Australia"),
    ("WA", "Western Australia"),
    ("TAS", "Tasmania"),
    ("NT", "Northern Territory"),
    ("ACT", "Australian Capital Territory"),
];

#[component]
pub fn SearchForm<FI, FS, FP, FX>(
    query: ReadSignal<String>,
    suggestions: ReadSignal<SuggestionList>,
    dropdown_open: ReadSignal<bool>,
    on_input: FI,
    on_state_change: FS,
    on_pick: FP,
    on_submit: FX,
) -> impl IntoView
where
    FI: Fn(String) + 'static + Clone + Send + Sync,
    FS: Fn(String) + 'static + Clone + Send + Sync,
    FP: Fn(String) + 'static + Clone + Send + Sync,
    FX: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <form
            id="australiaSchoolSearchForm"
            class="search-form"
            on:submit=move |ev: SubmitEvent| {
                ev.prevent_default();
                on_submit(());
            }
        >
            <div class="form-group">
                <label for="stateFilter">"State"</label>
                <select
                    id="stateFilter"
                    on:change=move |ev| on_state_change(event_target_value(&ev))
                >
                    {STATE_OPTIONS
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="schoolInput">"School name"</label>
                <div class="autocomplete-wrapper">
                    <input
                        type="text"
                        id="schoolInput"
                        autocomplete="off"
                        placeholder="Start typing a school name..."
                        prop:value=move || query.get()
                        on:input=move |ev| on_input(event_target_value(&ev))
                    />
                    <div
                        id="schoolSuggestions"
                        class="autocomplete-list"
                        style:display=move || if dropdown_open.get() { "block" } else { "none" }
                    >
                        {move || suggestion_items(suggestions.get(), on_pick.clone())}
                    </div>
                </div>
            </div>

            <button type="submit" class="btn btn-primary">"Search"</button>
        </form>
    }
}

fn suggestion_items<FP>(list: SuggestionList, on_pick: FP) -> AnyView
where
    FP: Fn(String) + 'static + Clone + Send + Sync,
{
    match list {
        SuggestionList::Empty => ().into_any(),
        SuggestionList::NoResults => view! {
            <div class="autocomplete-item">{NO_RESULTS_TEXT}</div>
        }
        .into_any(),
        SuggestionList::Rows(rows) => rows
            .into_iter()
            .map(|row| {
                let on_pick = on_pick.clone();
                let acara_id = row.acara_id.clone();
                view! {
                    <div
                        class="autocomplete-item"
                        data-acara-id=row.acara_id
                        on:click=move |_| on_pick(acara_id.clone())
                    >
                        <strong>{row.name}</strong>
                        <div class="autocomplete-detail">{row.detail}</div>
                    </div>
                }
            })
            .collect_view()
            .into_any(),
    }
}
