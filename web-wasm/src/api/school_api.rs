//! 学校検索API呼び出し（fetch）
//!
//! ステータスとボディ文字列を取得し、判定は共通ライブラリのパーサーに任せる。

use school_search_common::{
    parse_info_response, parse_suggestions, Error, InfoResponse, Result, Suggestion,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// JS側の例外を通信エラーに変換
pub fn js_error(value: JsValue) -> Error {
    let message = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Network(message)
}

/// GETしてステータスとボディを返す（2xx以外もそのまま返す）
async fn get_text(url: &str) -> Result<(u16, String)> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(js_error)?;

    let window = web_sys::window().ok_or_else(|| Error::Network("window is not available".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;

    Ok((resp.status(), text.as_string().unwrap_or_default()))
}

/// オートコンプリート候補を取得
pub async fn fetch_suggestions(url: &str) -> Result<Vec<Suggestion>> {
    let (status, body) = get_text(url).await?;
    parse_suggestions(status, &body)
}

/// 学校詳細を取得
pub async fn fetch_school_info(url: &str) -> Result<InfoResponse> {
    let (status, body) = get_text(url).await?;
    parse_info_response(status, &body)
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_js_error_from_string() {
        let err = js_error(JsValue::from_str("Failed to fetch"));
        assert_eq!(err.to_string(), "Network error: Failed to fetch");
    }

    #[wasm_bindgen_test]
    fn wasm_js_error_from_error_object() {
        let err = js_error(js_sys::Error::new("TypeError: NetworkError").into());
        assert!(err.to_string().contains("NetworkError"));
    }
}
