//! `@gemwallet/api` bridge

use async_trait::async_trait;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

use super::{from_js, js_message, settle, to_js};
use crate::wallet::{GemWalletApi, SdkError};

#[wasm_bindgen(module = "@gemwallet/api")]
extern "C" {
    #[wasm_bindgen(js_name = isInstalled, catch)]
    fn js_is_installed() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = getAddress, catch)]
    fn js_get_address() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = submitTransaction, catch)]
    fn js_submit_transaction(request: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = signTransaction, catch)]
    fn js_sign_transaction(request: &JsValue) -> Result<JsValue, JsValue>;
}

/// Gem Wallet through the extension's npm API module
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserGemWallet;

async fn resolve(method: &str, called: Result<JsValue, JsValue>) -> Result<Value, SdkError> {
    let value = called.map_err(|e| SdkError::call(method, js_message(&e)))?;
    from_js(method, settle(method, value).await?)
}

fn transaction_request(transaction: &Value) -> Result<JsValue, SdkError> {
    to_js(&json!({ "transaction": transaction }))
}

#[async_trait(?Send)]
impl GemWalletApi for BrowserGemWallet {
    async fn is_installed(&self) -> Result<Value, SdkError> {
        resolve("isInstalled", js_is_installed()).await
    }

    async fn get_address(&self) -> Result<Value, SdkError> {
        resolve("getAddress", js_get_address()).await
    }

    async fn submit_transaction(&self, transaction: Value) -> Result<Value, SdkError> {
        let request = transaction_request(&transaction)?;
        resolve("submitTransaction", js_submit_transaction(&request)).await
    }

    async fn sign_transaction(&self, transaction: Value) -> Result<Value, SdkError> {
        let request = transaction_request(&transaction)?;
        resolve("signTransaction", js_sign_transaction(&request)).await
    }
}
