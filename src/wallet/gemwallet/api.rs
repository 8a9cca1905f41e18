//! Gem Wallet API boundary
//!
//! Mirrors the `@gemwallet/api` module. Every call returns the module's raw
//! response object, e.g. `{ "type": "response", "result": { "address": "r..." } }`.

use async_trait::async_trait;
use serde_json::Value;

use crate::wallet::SdkError;
use crate::wasm_compat::{WasmCompatSend, WasmCompatSync};

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait GemWalletApi: WasmCompatSend + WasmCompatSync {
    /// `isInstalled()` → `{ result: { isInstalled } }`
    async fn is_installed(&self) -> Result<Value, SdkError>;

    /// `getAddress()` → `{ result: { address } }`
    async fn get_address(&self) -> Result<Value, SdkError>;

    /// `submitTransaction({ transaction })` → `{ result: { hash } }`
    async fn submit_transaction(&self, transaction: Value) -> Result<Value, SdkError>;

    /// `signTransaction({ transaction })` → `{ result: { signature } }`
    async fn sign_transaction(&self, transaction: Value) -> Result<Value, SdkError>;
}

/// Gem Wallet outside a browser: never installed
#[derive(Debug, Clone, Copy, Default)]
pub struct HostlessGemWallet;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl GemWalletApi for HostlessGemWallet {
    async fn is_installed(&self) -> Result<Value, SdkError> {
        Ok(serde_json::json!({ "type": "response", "result": { "isInstalled": false } }))
    }

    async fn get_address(&self) -> Result<Value, SdkError> {
        Err(unavailable())
    }

    async fn submit_transaction(&self, _transaction: Value) -> Result<Value, SdkError> {
        Err(unavailable())
    }

    async fn sign_transaction(&self, _transaction: Value) -> Result<Value, SdkError> {
        Err(unavailable())
    }
}

fn unavailable() -> SdkError {
    SdkError::Unavailable("Gem Wallet requires a browser host".to_string())
}
