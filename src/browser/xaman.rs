//! `xumm` SDK bridge

use async_trait::async_trait;
use js_sys::Reflect;
use serde_json::{json, Value};
use std::sync::Arc;
use wasm_bindgen::prelude::*;

use super::{call_path, from_js, get, js_message, settle, to_js};
use crate::wallet::{SdkError, XummLoader, XummSdk};

#[wasm_bindgen(module = "xumm")]
extern "C" {
    #[wasm_bindgen(js_name = Xumm)]
    type JsXumm;

    #[wasm_bindgen(constructor, js_class = "Xumm", catch)]
    fn new(api_key: &str) -> Result<JsXumm, JsValue>;
}

/// Constructs the Xumm SDK, but only when a browser window exists
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserXummLoader;

#[async_trait(?Send)]
impl XummLoader for BrowserXummLoader {
    async fn load(&self, api_key: &str) -> Result<Arc<dyn XummSdk>, SdkError> {
        if web_sys::window().is_none() {
            return Err(SdkError::Unavailable(
                "no browser window; the Xumm SDK needs a browser".to_string(),
            ));
        }
        let xumm = JsXumm::new(api_key).map_err(|e| SdkError::call("new Xumm", js_message(&e)))?;
        Ok(Arc::new(BrowserXumm { xumm: xumm.into() }))
    }
}

/// A constructed Xumm SDK instance
pub struct BrowserXumm {
    xumm: JsValue,
}

impl BrowserXumm {
    async fn call(&self, method: &[&str], args: &[JsValue]) -> Result<JsValue, SdkError> {
        call_path(&self.xumm, method, args).await
    }
}

#[async_trait(?Send)]
impl XummSdk for BrowserXumm {
    async fn authorize(&self) -> Result<(), SdkError> {
        let outcome = self.call(&["authorize"], &[]).await?;
        // `authorize()` resolves to an Error instead of rejecting when the popup fails.
        if outcome.is_instance_of::<js_sys::Error>() {
            return Err(SdkError::call("authorize", js_message(&outcome)));
        }
        Ok(())
    }

    async fn account(&self) -> Result<Option<String>, SdkError> {
        let account = get(&get(&self.xumm, "user"), "account");
        Ok(settle("user.account", account).await?.as_string())
    }

    async fn create_and_subscribe(&self, transaction: Value) -> Result<Value, SdkError> {
        // Resolve the subscription on the first event that carries a `signed` decision.
        let on_event = Closure::<dyn FnMut(JsValue) -> JsValue>::new(|event: JsValue| {
            let data = get(&event, "data");
            match Reflect::has(&data, &JsValue::from_str("signed")) {
                Ok(true) => data,
                _ => JsValue::UNDEFINED,
            }
        });

        let subscription = self
            .call(
                &["payload", "createAndSubscribe"],
                &[to_js(&transaction)?, on_event.as_ref().clone()],
            )
            .await?;
        let decision = settle("payload.createAndSubscribe", get(&subscription, "resolved")).await?;
        drop(on_event);

        let mut resolved = from_js("payload.createAndSubscribe", decision)?;
        if resolved.get("signed") == Some(&Value::Bool(true)) {
            // The event only carries the decision; the blob lives on the payload itself.
            let uuid = get(&get(&subscription, "created"), "uuid");
            let payload = self.call(&["payload", "get"], &[uuid]).await?;
            let response = from_js("payload.get", get(&payload, "response"))?;
            if let Some(fields) = resolved.as_object_mut() {
                if let Some(hex) = response.get("hex") {
                    fields.insert("signed_blob".to_string(), hex.clone());
                }
                fields.entry("txid").or_insert_with(|| response["txid"].clone());
                fields.insert("response".to_string(), response);
            }
        }
        Ok(json!({ "resolved": resolved }))
    }

    async fn logout(&self) -> Result<(), SdkError> {
        self.call(&["logout"], &[]).await.map(|_| ())
    }
}
