//! Xumm SDK boundary
//!
//! Xaman is driven through the `xumm` SDK, which can only be constructed in a
//! browser context. [`XummLoader`] produces an SDK handle on demand;
//! [`XummSdk`] is the handle itself.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::wallet::SdkError;
use crate::wasm_compat::{WasmCompatSend, WasmCompatSync};

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait XummSdk: WasmCompatSend + WasmCompatSync {
    /// `authorize()`: opens the Xaman sign-in flow
    async fn authorize(&self) -> Result<(), SdkError>;

    /// `user.account`: the authorized account, if any
    async fn account(&self) -> Result<Option<String>, SdkError>;

    /// `payload.createAndSubscribe(tx, ...)`, resolved once the user signs or
    /// rejects.
    ///
    /// Returns `{ resolved: { signed, txid, signed_blob, response } }`.
    async fn create_and_subscribe(&self, transaction: Value) -> Result<Value, SdkError>;

    /// `logout()`
    async fn logout(&self) -> Result<(), SdkError>;
}

/// Builds the Xumm SDK for an API key
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait XummLoader: WasmCompatSend + WasmCompatSync {
    /// Fails with [`SdkError::Unavailable`] when the host cannot run the SDK.
    async fn load(&self, api_key: &str) -> Result<Arc<dyn XummSdk>, SdkError>;
}

/// Loader for hosts without a browser window
#[derive(Debug, Clone, Copy, Default)]
pub struct HostlessXummLoader;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl XummLoader for HostlessXummLoader {
    async fn load(&self, _api_key: &str) -> Result<Arc<dyn XummSdk>, SdkError> {
        Err(SdkError::Unavailable(
            "the Xumm SDK can only be loaded in a browser".to_string(),
        ))
    }
}
