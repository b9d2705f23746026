//! 検索フローテスト
//!
//! モックサーバー + 端末ビューで 候補 → 選択 → 詳細 → 地図 を通しで検証

use school_search::client::ApiClient;
use school_search::error::SchoolSearchError;
use school_search::flow::{print_map_summary, run_autocomplete, run_detail};
use school_search::terminal::TerminalView;
use school_search::text_map::TextMapSurface;
use school_search_common::view::{LOAD_ERROR_ALERT, NO_RESULTS_TEXT, SELECT_SCHOOL_ALERT};
use school_search_common::{DetailOutcome, Endpoints, Phase, SearchSession, Viewport};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Fixture {
    client: ApiClient,
    session: SearchSession,
    view: TerminalView<Vec<u8>>,
    surface: TextMapSurface,
}

fn fixture(server: &MockServer) -> Fixture {
    let endpoints = Endpoints::new(server.uri());
    Fixture {
        client: ApiClient::new(5).expect("client construction should not fail"),
        session: SearchSession::new(endpoints.clone()),
        view: TerminalView::new(Vec::new(), endpoints),
        surface: TextMapSurface::new(),
    }
}

fn output(view: TerminalView<Vec<u8>>) -> String {
    String::from_utf8(view.into_inner()).expect("utf-8 output")
}

async fn mount_suggestions(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/autocomplete/australia-schools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "acara_sml_id": 41234,
                "school_name": "Sydney Boys High School",
                "state": "NSW",
                "school_sector": "Government"
            },
            {
                "acara_sml_id": 41235,
                "school_name": "Sydney Girls High School",
                "state": "NSW",
                "school_sector": "Government"
            }
        ])))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/australia-school/41235/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// 候補の番号付き表示
#[tokio::test]
async fn test_autocomplete_lists_rows() {
    let server = MockServer::start().await;
    mount_suggestions(&server).await;
    let mut f = fixture(&server);

    let count = run_autocomplete(&f.client, &mut f.session, &mut f.view, "sydney")
        .await
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(f.view.rows().len(), 2);
    let out = output(f.view);
    assert!(out.contains("  1. Sydney Boys High School (NSW - Government)"));
    assert!(out.contains("  2. Sydney Girls High School (NSW - Government)"));
}

/// 3文字未満は通信しない
#[tokio::test]
async fn test_short_query_does_not_call_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let mut f = fixture(&server);

    let err = run_autocomplete(&f.client, &mut f.session, &mut f.view, " sy ")
        .await
        .unwrap_err();

    assert!(matches!(err, SchoolSearchError::QueryTooShort(_)));
    assert!(f.view.rows().is_empty());
}

/// 0件は「No schools found」
#[tokio::test]
async fn test_no_results_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    let mut f = fixture(&server);

    let count = run_autocomplete(&f.client, &mut f.session, &mut f.view, "nowhere")
        .await
        .unwrap();

    assert_eq!(count, 0);
    assert_eq!(output(f.view).trim(), NO_RESULTS_TEXT);
}

/// 未選択での送信はアラートのみ
#[tokio::test]
async fn test_submit_without_selection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let mut f = fixture(&server);

    let err = run_detail(&f.client, &mut f.session, &mut f.view, &mut f.surface)
        .await
        .unwrap_err();

    assert!(matches!(err, SchoolSearchError::NotSelected));
    assert_eq!(f.view.last_alert(), Some(SELECT_SCHOOL_ALERT));
    assert!(!f.view.is_loading());
}

/// 候補を選んで詳細と5km圏を表示
#[tokio::test]
async fn test_select_and_show_detail_with_buffer() {
    let server = MockServer::start().await;
    mount_suggestions(&server).await;
    mount_detail(
        &server,
        serde_json::json!({
            "school_name": "Sydney Girls High School",
            "school_type": "Secondary",
            "school_type_full": "Secondary School",
            "year_levels": "7-12",
            "school_sector": "Government",
            "school_url": "https://sghs.example.edu.au",
            "icsea_score": 1150,
            "icsea_percentile": 97,
            "has_catchment": "Y",
            "school_id": 42,
            "latitude": -33.89,
            "longitude": 151.22,
            "geom_5km_buffer": {
                "type": "Polygon",
                "coordinates": [[[151.17, -33.94], [151.27, -33.94], [151.27, -33.84], [151.17, -33.94]]]
            }
        }),
    )
    .await;
    let mut f = fixture(&server);

    run_autocomplete(&f.client, &mut f.session, &mut f.view, "sydney")
        .await
        .unwrap();
    let chosen = f.session.select_suggestion(&mut f.view, "41235").unwrap();
    assert_eq!(chosen.school_name, "Sydney Girls High School");
    assert_eq!(f.view.query(), "Sydney Girls High School");

    let outcome = run_detail(&f.client, &mut f.session, &mut f.view, &mut f.surface)
        .await
        .unwrap();

    assert!(matches!(outcome, DetailOutcome::Displayed(Viewport::Fitted(_))));
    assert_eq!(f.session.phase(), Phase::Displayed);
    assert!(f.view.map_shown());
    assert!(!f.view.is_loading());

    let detail = f.view.detail().unwrap();
    assert_eq!(detail.icsea.as_deref(), Some("1150"));
    assert_eq!(detail.icsea_percentile.as_deref(), Some("97%"));
    assert_eq!(detail.naplan_url, None);

    print_map_summary(&mut f.view, &f.surface);
    let catchment = format!("{}/school-search?school_id=42", server.uri());
    let out = output(f.view);
    assert!(out.contains("Sydney Girls High School [Secondary] [Government]"));
    assert!(out.contains("  ICSEA Score: 1150"));
    assert!(!out.contains("NAPLAN"));
    assert!(out.contains(&catchment));
    assert!(out.contains("  5km Zone: S -33.94000 W 151.17000 N -33.84000 E 151.27000"));
}

/// 詳細取得の失敗は汎用アラート
#[tokio::test]
async fn test_detail_failure_alerts() {
    let server = MockServer::start().await;
    mount_suggestions(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/australia-school/41235/info"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;
    let mut f = fixture(&server);

    run_autocomplete(&f.client, &mut f.session, &mut f.view, "sydney")
        .await
        .unwrap();
    f.session.select_suggestion(&mut f.view, "41235");

    let err = run_detail(&f.client, &mut f.session, &mut f.view, &mut f.surface)
        .await
        .unwrap_err();

    assert!(matches!(err, SchoolSearchError::Common(_)));
    assert_eq!(f.view.last_alert(), Some(LOAD_ERROR_ALERT));
    assert_eq!(f.session.phase(), Phase::Error);
    assert!(f.view.detail().is_none());
    assert_eq!(f.surface.overlay_count(), 0);
}

/// `error` フィールドはサーバーのメッセージをそのままアラート
#[tokio::test]
async fn test_detail_server_error_message() {
    let server = MockServer::start().await;
    mount_detail(&server, serde_json::json!({ "error": "School not found" })).await;
    let mut f = fixture(&server);

    f.session.select_id("41235");
    let err = run_detail(&f.client, &mut f.session, &mut f.view, &mut f.surface)
        .await
        .unwrap_err();

    assert!(matches!(err, SchoolSearchError::Server(ref m) if m == "School not found"));
    assert_eq!(f.view.last_alert(), Some("School not found"));
    assert!(!f.surface.is_initialized());
}
