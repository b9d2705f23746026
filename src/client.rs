//! 検索APIクライアント
//!
//! レスポンスの解釈は共通ライブラリのパーサーに任せ、ここでは取得だけ行う。

use std::time::Duration;

use reqwest::Client;
use school_search_common::{parse_info_response, parse_suggestions, Error, InfoResponse, Suggestion};
use tracing::debug;

use crate::error::Result;

pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("school-search/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// ステータスと本文を取得
    async fn get_text(&self, url: &str) -> school_search_common::Result<(u16, String)> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(network_error)?;
        debug!(url, status, bytes = body.len(), "response");
        Ok((status, body))
    }

    pub async fn fetch_suggestions(&self, url: &str) -> school_search_common::Result<Vec<Suggestion>> {
        let (status, body) = self.get_text(url).await?;
        parse_suggestions(status, &body)
    }

    pub async fn fetch_school_info(&self, url: &str) -> school_search_common::Result<InfoResponse> {
        let (status, body) = self.get_text(url).await?;
        parse_info_response(status, &body)
    }

    /// 加工前のJSON（`--json` 出力用）
    ///
    /// `error` フィールドを含む応答もそのまま返す。
    pub async fn fetch_raw_json(&self, url: &str) -> school_search_common::Result<serde_json::Value> {
        let (status, body) = self.get_text(url).await?;
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(_) if !(200..300).contains(&status) => Err(Error::Http { status }),
            Err(e) => Err(Error::Json(e)),
        }
    }
}

fn network_error(e: reqwest::Error) -> Error {
    Error::Network(e.to_string())
}
