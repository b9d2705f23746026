use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchoolSearchError {
    #[error(transparent)]
    Common(#[from] school_search_common::Error),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("学校が見つかりません: {0}")]
    NoSuggestions(String),

    #[error("検索語は3文字以上で入力してください: {0}")]
    QueryTooShort(String),

    #[error("候補番号が範囲外です: {index}（候補数 {count}）")]
    PickOutOfRange { index: usize, count: usize },

    #[error("学校が選択されていません")]
    NotSelected,

    #[error("サーバーエラー: {0}")]
    Server(String),

    #[error("選択が中断されました")]
    Aborted,
}

pub type Result<T> = std::result::Result<T, SchoolSearchError>;
