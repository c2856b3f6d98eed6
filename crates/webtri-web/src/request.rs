//! Promise plumbing for the WebGPU requests.

use js_sys::{Promise, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use webtri_engine::device::Fault;

use crate::fault;

/// Awaits `promise`; a rejection becomes a [`Fault`] built from the rejection
/// value itself.
pub(crate) async fn settle(promise: Promise) -> Result<JsValue, Fault> {
    JsFuture::from(promise)
        .await
        .map_err(|value| fault::from_js(&value))
}

/// `adapter.info.description`, or an empty string when the browser does not
/// expose it.
pub(crate) fn adapter_description(adapter: &JsValue) -> String {
    Reflect::get(adapter, &JsValue::from_str("info"))
        .and_then(|info| Reflect::get(&info, &JsValue::from_str("description")))
        .ok()
        .and_then(|description| description.as_string())
        .unwrap_or_default()
}
