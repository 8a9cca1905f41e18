//! `XRPLWalletConnect`, the facade as a JavaScript class
//!
//! ```js
//! const connect = new XRPLWalletConnect({ xamanApiKey: 'your-xaman-api-key' });
//! connect.selectWallet('gemwallet');
//! const { wallet, address } = await connect.signIn();
//! const { hash } = await connect.signAndSubmit({ TransactionType: 'Payment', ... });
//! ```

use js_sys::Promise;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::wallet::{Config, Payload, WalletAdapter, WalletConnectError};
use crate::WalletConnect;

#[wasm_bindgen(js_name = XRPLWalletConnect)]
pub struct JsWalletConnect {
    inner: WalletConnect,
}

fn js_error(err: WalletConnectError) -> JsValue {
    JsError::new(&err.to_string()).into()
}

fn to_plain_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn payload_from_js(payload: JsValue) -> Result<Payload, JsValue> {
    let value: Value = serde_wasm_bindgen::from_value(payload).map_err(JsValue::from)?;
    Payload::try_from(value).map_err(js_error)
}

#[wasm_bindgen(js_class = XRPLWalletConnect)]
impl JsWalletConnect {
    /// `config` is `{ xamanApiKey?: string }`, or nothing.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsWalletConnect, JsError> {
        let config: Config = if config.is_undefined() || config.is_null() {
            Config::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            inner: WalletConnect::new(config),
        })
    }

    #[wasm_bindgen(js_name = selectWallet)]
    pub fn select_wallet(&mut self, wallet: &str) -> Result<(), JsError> {
        Ok(self.inner.select_wallet(wallet)?)
    }

    #[wasm_bindgen(getter = selectedWallet)]
    pub fn selected_wallet(&self) -> Option<String> {
        self.inner.selected().map(|wallet| wallet.to_string())
    }

    #[wasm_bindgen(js_name = signIn)]
    pub fn sign_in(&self) -> Promise {
        let adapter = self.inner.active_adapter();
        future_to_promise(async move {
            let result = adapter.map_err(js_error)?.sign_in().await.map_err(js_error)?;
            to_plain_js(&result)
        })
    }

    #[wasm_bindgen(js_name = signAndSubmit)]
    pub fn sign_and_submit(&self, payload: JsValue) -> Promise {
        let adapter = self.inner.active_adapter();
        future_to_promise(async move {
            let adapter = adapter.map_err(js_error)?;
            let payload = payload_from_js(payload)?;
            let result = adapter.sign_and_submit(payload).await.map_err(js_error)?;
            to_plain_js(&result)
        })
    }

    pub fn sign(&self, payload: JsValue) -> Promise {
        let adapter = self.inner.active_adapter();
        future_to_promise(async move {
            let adapter = adapter.map_err(js_error)?;
            let payload = payload_from_js(payload)?;
            let result = adapter.sign(payload).await.map_err(js_error)?;
            to_plain_js(&result)
        })
    }

    pub fn logout(&self) -> Promise {
        let adapter = self.inner.active_adapter();
        future_to_promise(async move {
            let adapter: Arc<dyn WalletAdapter> = adapter.map_err(js_error)?;
            if let Some(session) = adapter.as_logout() {
                session.logout().await.map_err(js_error)?;
            }
            Ok(JsValue::UNDEFINED)
        })
    }
}
