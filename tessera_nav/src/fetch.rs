use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::error::NavError;

/// Fetch `url` as text, mapping non-success statuses and transport
/// failures into the error taxonomy.
pub(crate) async fn fetch_text(window: &web_sys::Window, url: &str) -> Result<String, NavError> {
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|err| NavError::Network(js_error_message(&err)))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| NavError::Network("fetch returned a non-Response value".to_owned()))?;

    if !response.ok() {
        return Err(NavError::Fetch {
            status: response.status(),
            url: url.to_owned(),
        });
    }

    let text_promise = response
        .text()
        .map_err(|err| NavError::Network(js_error_message(&err)))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|err| NavError::Network(js_error_message(&err)))?;

    text.as_string()
        .ok_or_else(|| NavError::Network("response body was not text".to_owned()))
}

pub(crate) fn js_error_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
