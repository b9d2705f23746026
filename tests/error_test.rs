//! エラーケーステスト
//!
//! 各種エラーの変換とメッセージを検証

use school_search::error::SchoolSearchError;
use school_search_common::Error;

/// 共通ライブラリのエラーはそのまま表示
#[test]
fn test_common_error_is_transparent() {
    let err: SchoolSearchError = Error::Http { status: 503 }.into();
    assert!(matches!(err, SchoolSearchError::Common(Error::Http { status: 503 })));
    assert_eq!(err.to_string(), Error::Http { status: 503 }.to_string());
}

/// JSON解析エラーの変換
#[test]
fn test_json_error_conversion() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: SchoolSearchError = parse_err.into();
    assert!(matches!(err, SchoolSearchError::JsonParse(_)));
    assert!(err.to_string().starts_with("JSON解析エラー"));
}

/// IOエラーの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: SchoolSearchError = io_err.into();
    assert!(matches!(err, SchoolSearchError::Io(_)));
}

/// 候補番号の範囲外
#[test]
fn test_pick_out_of_range_message() {
    let err = SchoolSearchError::PickOutOfRange { index: 5, count: 3 };
    let message = err.to_string();
    assert!(message.contains('5'));
    assert!(message.contains('3'));
}
