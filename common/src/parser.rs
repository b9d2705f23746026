//! APIレスポンスパーサー
//!
//! HTTPステータスとボディ文字列から候補一覧・学校詳細を取り出す。
//! ブラウザ(fetch)とCLI(reqwest)で同じ判定を使う。

use crate::error::{Error, Result};
use crate::types::{InfoResponse, SchoolDetail, Suggestion};

/// オートコンプリートのレスポンスをパース
///
/// 2xx以外はHTTPエラー。ボディはJSON配列でなければならない（空配列可）。
pub fn parse_suggestions(status: u16, body: &str) -> Result<Vec<Suggestion>> {
    if !is_success(status) {
        return Err(Error::Http { status });
    }
    Ok(serde_json::from_str(body)?)
}

/// 学校詳細のレスポンスをパース
///
/// 判定順:
/// 1. `error` フィールドがあれば（ステータスに関係なく）`InfoResponse::Error`
/// 2. 2xx以外は HTTPエラー
/// 3. それ以外は `SchoolDetail`
///
/// # Examples
/// ```
/// use school_search_common::{parse_info_response, InfoResponse};
///
/// let res = parse_info_response(404, r#"{"error": "School not found"}"#).unwrap();
/// assert_eq!(res, InfoResponse::Error("School not found".to_string()));
/// ```
pub fn parse_info_response(status: u16, body: &str) -> Result<InfoResponse> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !is_success(status) => return Err(Error::Http { status }),
        Err(e) => return Err(e.into()),
    };

    if let Some(message) = error_message(&value) {
        return Ok(InfoResponse::Error(message));
    }

    if !is_success(status) {
        return Err(Error::Http { status });
    }

    let detail: SchoolDetail = serde_json::from_value(value)?;
    Ok(InfoResponse::Detail(Box::new(detail)))
}

/// `error` フィールドの取り出し（null・空文字列・false は無視）
fn error_message(value: &serde_json::Value) -> Option<String> {
    match value.get("error")? {
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suggestions_array() {
        let body = r#"[
            {"acara_sml_id": 1, "school_name": "A School", "state": "NSW", "school_sector": "Government"},
            {"acara_sml_id": "2", "school_name": "B School", "state": "VIC", "school_sector": "Catholic"}
        ]"#;
        let list = parse_suggestions(200, body).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].acara_sml_id, "2");
    }

    #[test]
    fn test_parse_suggestions_empty() {
        assert!(parse_suggestions(200, "[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_suggestions_not_array() {
        let result = parse_suggestions(200, r#"{"error": "boom"}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_suggestions_http_error() {
        let result = parse_suggestions(500, "Internal Server Error");
        assert!(matches!(result, Err(Error::Http { status: 500 })));
    }

    #[test]
    fn test_parse_info_detail() {
        let body = r#"{"school_name": "Test High", "icsea_score": 1050, "has_catchment": "Y", "school_id": 42}"#;
        match parse_info_response(200, body).unwrap() {
            InfoResponse::Detail(d) => {
                assert_eq!(d.school_name, "Test High");
                assert_eq!(d.icsea_score.as_deref(), Some("1050"));
                assert!(d.has_catchment_zone());
            }
            other => panic!("expected detail, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_info_error_field() {
        let res = parse_info_response(200, r#"{"error": "School not found"}"#).unwrap();
        assert_eq!(res, InfoResponse::Error("School not found".into()));
    }

    #[test]
    fn test_parse_info_null_error_field_ignored() {
        let res = parse_info_response(200, r#"{"error": null, "school_name": "X"}"#).unwrap();
        assert!(matches!(res, InfoResponse::Detail(_)));
    }

    #[test]
    fn test_parse_info_http_error_without_body() {
        let res = parse_info_response(502, "<html>Bad Gateway</html>");
        assert!(matches!(res, Err(Error::Http { status: 502 })));
    }

    #[test]
    fn test_parse_info_http_error_with_json_body() {
        let res = parse_info_response(500, r#"{"detail": "oops"}"#);
        assert!(matches!(res, Err(Error::Http { status: 500 })));
    }

    #[test]
    fn test_parse_info_invalid_json() {
        let res = parse_info_response(200, "not json");
        assert!(matches!(res, Err(Error::Json(_))));
    }
}
