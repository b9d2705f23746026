//! 学校詳細パネルコンポーネント
//!
//! 任意項目の行は値があるときだけ表示する。

use leptos::prelude::*;
use school_search_common::DetailView;

#[component]
pub fn SchoolInfo(
    detail: ReadSignal<Option<DetailView>>,
    visible: ReadSignal<bool>,
) -> impl IntoView {
    let text = move |f: fn(&DetailView) -> String| {
        move || detail.with(|d| d.as_ref().map(f).unwrap_or_default())
    };
    let optional = move |f: fn(&DetailView) -> Option<String>| {
        Signal::derive(move || detail.with(|d| d.as_ref().and_then(f)))
    };

    let sector_class = move || {
        detail.with(|d| {
            d.as_ref()
                .map(|d| d.sector.class_name())
                .unwrap_or_else(|| "sector-badge".to_string())
        })
    };
    let catchment = optional(|d| d.catchment_link.clone());

    view! {
        <section
            id="schoolInfoSection"
            class="school-info"
            style:display=move || if visible.get() { "block" } else { "none" }
        >
            <div class="school-header">
                <h2 id="schoolName">{text(|d| d.name.clone())}</h2>
                <div class="badges">
                    <span id="schoolTypeBadge" class="type-badge">{text(|d| d.type_badge.clone())}</span>
                    <span id="schoolSectorBadge" class=sector_class>{text(|d| d.sector.text.clone())}</span>
                </div>
            </div>

            <div class="info-grid">
                <div class="info-row">
                    <span class="info-label">"Year Levels"</span>
                    <span id="yearLevels" class="info-value">{text(|d| d.year_levels.clone())}</span>
                </div>
                <div class="info-row">
                    <span class="info-label">"School Type"</span>
                    <span id="schoolType" class="info-value">{text(|d| d.type_label.clone())}</span>
                </div>

                <LinkRow
                    id="schoolUrl"
                    label="Website"
                    link_text="Visit website"
                    href=optional(|d| d.website.clone())
                />
                <LinkRow
                    id="schoolProfile"
                    label="School Profile"
                    link_text="View profile"
                    href=optional(|d| d.profile_url.clone())
                />
                <LinkRow
                    id="naplanScores"
                    label="NAPLAN"
                    link_text="View NAPLAN results"
                    href=optional(|d| d.naplan_url.clone())
                />
                <TextRow id="icsea" label="ICSEA Score" value=optional(|d| d.icsea.clone()) />
                <TextRow
                    id="icsea-percentile"
                    label="ICSEA Percentile"
                    value=optional(|d| d.icsea_percentile.clone())
                />
            </div>

            <div
                id="catchmentButtonContainer"
                class="catchment-cta"
                style:display=move || if catchment.with(|c| c.is_some()) { "block" } else { "none" }
            >
                <a
                    id="catchmentButton"
                    class="btn btn-secondary"
                    href=move || catchment.get().unwrap_or_default()
                >
                    "View catchment zone"
                </a>
            </div>
        </section>
    }
}

fn row_display(value: Signal<Option<String>>) -> impl Fn() -> &'static str + Send + Sync + 'static {
    move || if value.with(|v| v.is_some()) { "flex" } else { "none" }
}

/// 外部リンクの行
#[component]
fn LinkRow(
    id: &'static str,
    label: &'static str,
    link_text: &'static str,
    href: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div id=format!("{}-container", id) class="info-row" style:display=row_display(href)>
            <span class="info-label">{label}</span>
            <a
                id=id
                class="info-link"
                href=move || href.get().unwrap_or_default()
                target="_blank"
                rel="noopener noreferrer"
            >
                {link_text}
            </a>
        </div>
    }
}

/// 値を表示する行
#[component]
fn TextRow(id: &'static str, label: &'static str, value: Signal<Option<String>>) -> impl IntoView {
    view! {
        <div id=format!("{}-container", id) class="info-row" style:display=row_display(value)>
            <span class="info-label">{label}</span>
            <span id=id class="info-value">{move || value.get().unwrap_or_default()}</span>
        </div>
    }
}
