//! Moving values between serde and JavaScript.

use mailsig_core::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Converts a serializable value into a plain JS object.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    let text = serde_json::to_string(value)?;
    js_sys::JSON::parse(&text).map_err(|e| Error::HostApi(error_message(&e)))
}

/// Reads a JS value back through JSON. `undefined` reads as `null`.
pub fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T> {
    if value.is_undefined() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    let text: String = js_sys::JSON::stringify(value)
        .map_err(|e| Error::HostApi(error_message(&e)))?
        .into();
    Ok(serde_json::from_str(&text)?)
}

/// Awaits a promise, turning a rejection into its message.
pub async fn settle(promise: js_sys::Promise) -> std::result::Result<JsValue, String> {
    JsFuture::from(promise)
        .await
        .map_err(|e| error_message(&e))
}

/// Best-effort message for a thrown JS value.
pub fn error_message(error: &JsValue) -> String {
    if let Some(error) = error.dyn_ref::<js_sys::Error>() {
        return error.message().into();
    }
    error
        .as_string()
        .unwrap_or_else(|| format!("{error:?}"))
}
