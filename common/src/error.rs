//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Map error: {0}")]
    Map(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        let display = format!("{}", error);
        assert!(display.contains("JSON error"));
    }

    #[test]
    fn test_error_display_http() {
        let error = Error::Http { status: 503 };
        assert_eq!(format!("{}", error), "HTTP error: status 503");
    }

    #[test]
    fn test_error_display_network() {
        let error = Error::Network("connection refused".to_string());
        assert_eq!(format!("{}", error), "Network error: connection refused");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Map("L is not defined".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Map"));
        assert!(debug.contains("L is not defined"));
    }
}
