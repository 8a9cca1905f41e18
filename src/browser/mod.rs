//! Browser bridges (wasm32 + `browser` feature)
//!
//! wasm-bindgen implementations of the SDK traits over the wallet providers'
//! npm modules, and the `XRPLWalletConnect` class exported to JavaScript.
//! Values cross the boundary as JSON: Rust `serde_json::Value` in, plain JS
//! objects out.

mod crossmark;
mod facade;
mod gemwallet;
mod xaman;

pub use crossmark::BrowserCrossmark;
pub use facade::JsWalletConnect;
pub use gemwallet::BrowserGemWallet;
pub use xaman::{BrowserXumm, BrowserXummLoader};

use js_sys::{Array, Function, Promise, Reflect};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::wallet::SdkError;

/// Serialize to a plain JS value (maps become objects)
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, SdkError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| SdkError::call("serialize", e.to_string()))
}

/// Read a JS value back as JSON; `undefined` becomes `null`
pub(crate) fn from_js(method: &str, value: JsValue) -> Result<Value, SdkError> {
    if value.is_undefined() {
        return Ok(Value::Null);
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| SdkError::call(method, e.to_string()))
}

/// Best-effort message out of a thrown JS value
pub(crate) fn js_message(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    get(err, "message")
        .as_string()
        .unwrap_or_else(|| format!("{err:?}"))
}

pub(crate) fn get(target: &JsValue, key: &str) -> JsValue {
    if target.is_undefined() || target.is_null() {
        return JsValue::UNDEFINED;
    }
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

/// Await `value` if it is a promise
pub(crate) async fn settle(method: &str, value: JsValue) -> Result<JsValue, SdkError> {
    if !value.is_instance_of::<Promise>() {
        return Ok(value);
    }
    JsFuture::from(value.unchecked_into::<Promise>())
        .await
        .map_err(|e| SdkError::call(method, js_message(&e)))
}

/// Resolve `root.a.b.method` to `(this, function)`, if it exists
pub(crate) fn lookup_function(root: &JsValue, path: &[&str]) -> Option<(JsValue, Function)> {
    let (name, parents) = path.split_last()?;
    let this = parents.iter().fold(root.clone(), |target, key| get(&target, key));
    let function = get(&this, name).dyn_into::<Function>().ok()?;
    Some((this, function))
}

/// Call `root.a.b.method(...args)` with its parent as `this`, awaiting a
/// returned promise.
pub(crate) async fn call_path(
    root: &JsValue,
    path: &[&str],
    args: &[JsValue],
) -> Result<JsValue, SdkError> {
    let method = path.join(".");
    let (this, function) = lookup_function(root, path)
        .ok_or_else(|| SdkError::Unavailable(format!("`{method}` is not available")))?;

    let result = function
        .apply(&this, &Array::from_iter(args.iter()))
        .map_err(|e| SdkError::call(&method, js_message(&e)))?;
    settle(&method, result).await
}
