use js_sys::{Error, Object};
use wasm_bindgen::{JsCast, JsValue};
use webtri_engine::device::Fault;

/// Converts a JS exception or rejection value into a [`Fault`].
///
/// `Error` objects contribute their message; anything else is stringified
/// the way `String(value)` would.
pub(crate) fn from_js(value: &JsValue) -> Fault {
    if let Some(error) = value.dyn_ref::<Error>() {
        return Fault::Message(String::from(error.message()));
    }
    Fault::Value(string_form(value))
}

fn string_form(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if value.is_null() {
        return "null".into();
    }
    if value.is_undefined() {
        return "undefined".into();
    }
    if let Some(n) = value.as_f64() {
        return js_sys::Number::from(n)
            .to_string(10)
            .map(String::from)
            .unwrap_or_else(|_| n.to_string());
    }
    if let Some(b) = value.as_bool() {
        return b.to_string();
    }
    match value.dyn_ref::<Object>() {
        Some(object) => String::from(object.to_string()),
        None => format!("{value:?}"),
    }
}
