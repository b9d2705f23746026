//! 1回分の問い合わせを実行する
//!
//! セッションからリクエストを受け取り、取得した結果をセッションに戻す。

use std::io::Write;

use school_search_common::{AutocompleteOutcome, DetailOutcome, SearchSession};
use tracing::{debug, error, warn};

use crate::client::ApiClient;
use crate::error::{Result, SchoolSearchError};
use crate::terminal::TerminalView;
use crate::text_map::TextMapSurface;

/// 候補を取得して表示する
///
/// 表示した件数を返す（0件は「No schools found」を表示済み）。
pub async fn run_autocomplete<W: Write>(
    client: &ApiClient,
    session: &mut SearchSession,
    view: &mut TerminalView<W>,
    query: &str,
) -> Result<usize> {
    let Some(request) = session.on_query_input(view, query) else {
        return Err(SchoolSearchError::QueryTooShort(query.to_string()));
    };

    let result = client.fetch_suggestions(&request.url).await;
    match session.on_suggestions(view, request.id, result) {
        AutocompleteOutcome::Shown(count) => Ok(count),
        AutocompleteOutcome::NoResults => Ok(0),
        AutocompleteOutcome::Failed(e) => {
            error!(error = %e, "Error fetching schools");
            Err(e.into())
        }
        AutocompleteOutcome::Superseded => {
            debug!(id = ?request.id, "autocomplete response superseded");
            Ok(0)
        }
    }
}

/// 選択中の学校の詳細を取得して表示する
///
/// 詳細パネルが描けた場合（地図だけ失敗した場合を含む）は Ok。
pub async fn run_detail<W: Write>(
    client: &ApiClient,
    session: &mut SearchSession,
    view: &mut TerminalView<W>,
    surface: &mut TextMapSurface,
) -> Result<DetailOutcome> {
    let Some(request) = session.submit(view) else {
        return Err(SchoolSearchError::NotSelected);
    };

    let result = client.fetch_school_info(&request.url).await;
    match session.on_detail(view, surface, request.id, result) {
        DetailOutcome::Failed(e) => {
            error!(error = %e, acara_id = %request.acara_id, "Error loading school data");
            Err(e.into())
        }
        DetailOutcome::ServerError(message) => Err(SchoolSearchError::Server(message)),
        DetailOutcome::MapFailed(e) => {
            warn!(error = %e, "map rendering failed");
            Ok(DetailOutcome::MapFailed(e))
        }
        outcome => Ok(outcome),
    }
}

/// 地図の要約を出力
pub fn print_map_summary<W: Write>(view: &mut TerminalView<W>, surface: &TextMapSurface) {
    let lines = surface.summary();
    if lines.is_empty() {
        return;
    }
    view.print_line("");
    view.print_line("Map");
    for line in lines {
        view.print_line(&line);
    }
}
