//! Crossmark SDK boundary
//!
//! Mirrors `@crossmarkio/sdk`. The `*_and_wait` methods resolve to the
//! SDK's raw `{ request, response, createdAt, resolvedAt }` object.

use async_trait::async_trait;
use serde_json::Value;

use crate::wallet::SdkError;
use crate::wasm_compat::{WasmCompatSend, WasmCompatSync};

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait CrossmarkSdk: WasmCompatSend + WasmCompatSync {
    /// Synchronous install check.
    ///
    /// `None` when this SDK build offers no way to check; the adapter then
    /// proceeds and surfaces whatever the sign-in call fails with.
    fn is_installed(&self) -> Option<bool>;

    /// `methods.signInAndWait()` → `{ response: { data: { address } } }`
    async fn sign_in_and_wait(&self) -> Result<Value, SdkError>;

    /// `methods.signAndSubmitAndWait(tx)` → `{ response: { data: { resp } } }`
    async fn sign_and_submit_and_wait(&self, transaction: Value) -> Result<Value, SdkError>;

    /// `methods.signAndWait(tx)` → `{ response: { data: { txBlob } } }`
    async fn sign_and_wait(&self, transaction: Value) -> Result<Value, SdkError>;
}

/// Crossmark outside a browser: never installed
#[derive(Debug, Clone, Copy, Default)]
pub struct HostlessCrossmark;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl CrossmarkSdk for HostlessCrossmark {
    fn is_installed(&self) -> Option<bool> {
        Some(false)
    }

    async fn sign_in_and_wait(&self) -> Result<Value, SdkError> {
        Err(unavailable())
    }

    async fn sign_and_submit_and_wait(&self, _transaction: Value) -> Result<Value, SdkError> {
        Err(unavailable())
    }

    async fn sign_and_wait(&self, _transaction: Value) -> Result<Value, SdkError> {
        Err(unavailable())
    }
}

fn unavailable() -> SdkError {
    SdkError::Unavailable("Crossmark requires a browser host".to_string())
}
