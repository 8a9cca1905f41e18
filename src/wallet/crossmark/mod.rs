//! Crossmark Adapter
//!
//! Crossmark is a browser extension driven through `@crossmarkio/sdk`.
//! Submission responses nest the ledger result at different depths depending
//! on the SDK version, so the hash is looked up in order:
//!
//! 1. `response.data.resp.result.hash`
//! 2. `response.data.resp.hash`

mod sdk;

pub use sdk::{CrossmarkSdk, HostlessCrossmark};

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::wallet::types::lookup_str;
use crate::wallet::{
    Logout, Payload, Result, Session, SignAndSubmitResult, SignInResult, SignResult,
    WalletAdapter, WalletConnectError, WalletType,
};

const WALLET: WalletType = WalletType::Crossmark;

/// Hash lookup order for `signAndSubmitAndWait` responses
const HASH_POINTERS: [&str; 2] = ["/response/data/resp/result/hash", "/response/data/resp/hash"];

/// Adapter over the Crossmark SDK
pub struct CrossmarkAdapter {
    sdk: Arc<dyn CrossmarkSdk>,
    session: Session,
}

impl CrossmarkAdapter {
    pub fn new(sdk: Arc<dyn CrossmarkSdk>) -> Self {
        Self {
            sdk,
            session: Session::new(WALLET),
        }
    }

    fn ensure_installed(&self) -> Result<()> {
        match self.sdk.is_installed() {
            Some(false) => {
                warn!("Crossmark extension not detected");
                Err(WalletConnectError::NotInstalled { wallet: WALLET })
            }
            // No check available: let the sign-in call decide
            Some(true) | None => Ok(()),
        }
    }
}

impl std::fmt::Debug for CrossmarkAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossmarkAdapter")
            .field("session", &self.session)
            .finish()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl WalletAdapter for CrossmarkAdapter {
    fn wallet_type(&self) -> WalletType {
        WALLET
    }

    async fn address(&self) -> Option<String> {
        self.session.address().await
    }

    async fn sign_in(&self) -> Result<SignInResult> {
        self.ensure_installed()?;

        let response = self.sdk.sign_in_and_wait().await.map_err(|e| {
            WalletConnectError::Authentication {
                wallet: WALLET,
                message: e.to_string(),
            }
        })?;
        let address = lookup_str(&response, &["/response/data/address"])
            .ok_or_else(|| WalletConnectError::Authentication {
                wallet: WALLET,
                message: "no address received".to_string(),
            })?
            .to_string();

        self.session.set(address.clone()).await;
        info!(wallet = %WALLET, %address, "Signed in");
        Ok(SignInResult {
            wallet: WALLET,
            address,
        })
    }

    async fn sign_and_submit(&self, payload: Payload) -> Result<SignAndSubmitResult> {
        let address = self.session.require_address().await?;
        let transaction = payload.with_default_account(&address);
        debug!(wallet = %WALLET, "Submitting transaction");

        let response = self
            .sdk
            .sign_and_submit_and_wait(transaction.into_value())
            .await
            .map_err(|e| WalletConnectError::Submission {
                wallet: WALLET,
                message: e.to_string(),
            })?;

        let Some(hash) = lookup_str(&response, &HASH_POINTERS) else {
            return Err(WalletConnectError::Submission {
                wallet: WALLET,
                message: format!("hash not found in response: {}", response),
            });
        };

        let result = response
            .pointer("/response/data/resp")
            .or_else(|| response.pointer("/response/data"))
            .cloned()
            .unwrap_or_default();

        Ok(SignAndSubmitResult {
            hash: hash.to_string(),
            result,
        })
    }

    async fn sign(&self, payload: Payload) -> Result<SignResult> {
        let address = self.session.require_address().await?;
        let transaction = payload.with_default_account(&address);
        debug!(wallet = %WALLET, "Signing transaction");

        let response = self
            .sdk
            .sign_and_wait(transaction.clone().into_value())
            .await
            .map_err(|e| WalletConnectError::Signing {
                wallet: WALLET,
                message: e.to_string(),
            })?;

        let Some(blob) = lookup_str(&response, &["/response/data/txBlob"]) else {
            return Err(WalletConnectError::Signing {
                wallet: WALLET,
                message: format!("signed transaction (txBlob) not found in response: {}", response),
            });
        };

        // The SDK only returns the blob; the signed JSON is what we sent.
        Ok(SignResult {
            signed_tx: blob.to_string(),
            tx_json: transaction.into_value(),
        })
    }

    fn as_logout(&self) -> Option<&dyn Logout> {
        Some(self)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Logout for CrossmarkAdapter {
    /// Crossmark exposes no logout; only the local session is cleared.
    async fn logout(&self) -> Result<()> {
        self.session.clear().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::testing::FakeCrossmark;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn adapter(fake: FakeCrossmark) -> CrossmarkAdapter {
        CrossmarkAdapter::new(Arc::new(fake))
    }

    fn payload(value: serde_json::Value) -> Payload {
        Payload::try_from(value).unwrap()
    }

    #[tokio::test]
    async fn test_not_installed_fails_before_sdk_call() {
        let mut fake = FakeCrossmark::signed_in_as("rAbc123");
        fake.installed = Some(false);
        let calls = fake.calls.clone();
        let crossmark = adapter(fake);

        let err = assert_err!(crossmark.sign_in().await);
        assert_eq!(err, WalletConnectError::NotInstalled { wallet: WalletType::Crossmark });
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_install_state_surfaces_sdk_error() {
        let mut fake = FakeCrossmark::signed_in_as("rAbc123");
        fake.installed = None;
        fake.fail_with = Some(crate::wallet::SdkError::call("signInAndWait", "no response from extension"));
        let crossmark = adapter(fake);

        let err = assert_err!(crossmark.sign_in().await);
        assert!(matches!(err, WalletConnectError::Authentication { ref message, .. }
            if message.contains("signInAndWait")));
    }

    #[tokio::test]
    async fn test_unknown_install_state_proceeds() {
        let mut fake = FakeCrossmark::signed_in_as("rAbc123");
        fake.installed = None;
        let crossmark = adapter(fake);

        let result = assert_ok!(crossmark.sign_in().await);
        assert_eq!(result.address, "rAbc123");
    }

    #[tokio::test]
    async fn test_hash_prefers_nested_result() {
        let mut fake = FakeCrossmark::signed_in_as("rAbc123");
        fake.submit_response = json!({
            "response": { "data": { "resp": { "hash": "SHALLOW", "result": { "hash": "NESTED" } } } }
        });
        let crossmark = adapter(fake);
        crossmark.sign_in().await.unwrap();

        let result = crossmark.sign_and_submit(payload(json!({ "Amount": "10" }))).await.unwrap();
        assert_eq!(result.hash, "NESTED");
        assert_eq!(result.result["hash"], json!("SHALLOW"));
    }

    #[tokio::test]
    async fn test_hash_falls_back_to_shallow_field() {
        let mut fake = FakeCrossmark::signed_in_as("rAbc123");
        fake.submit_response = json!({ "response": { "data": { "resp": { "hash": "SHALLOW" } } } });
        let crossmark = adapter(fake);
        crossmark.sign_in().await.unwrap();

        let result = crossmark.sign_and_submit(payload(json!({ "Amount": "10" }))).await.unwrap();
        assert_eq!(result.hash, "SHALLOW");
    }

    #[tokio::test]
    async fn test_missing_hash_is_submission_error() {
        let mut fake = FakeCrossmark::signed_in_as("rAbc123");
        fake.submit_response = json!({ "response": { "data": { "resp": { "result": {} } } } });
        let crossmark = adapter(fake);
        crossmark.sign_in().await.unwrap();

        let err = assert_err!(crossmark.sign_and_submit(payload(json!({ "Amount": "10" }))).await);
        assert!(matches!(err, WalletConnectError::Submission { ref message, .. }
            if message.contains("hash not found")));
    }

    #[tokio::test]
    async fn test_caller_account_is_not_overwritten() {
        let fake = FakeCrossmark::signed_in_as("rAbc123");
        let calls = fake.calls.clone();
        let crossmark = adapter(fake);
        crossmark.sign_in().await.unwrap();

        crossmark
            .sign_and_submit(payload(json!({ "Amount": "10", "Account": "rCaller" })))
            .await
            .unwrap();
        let sent = calls.lock().unwrap().last().cloned().unwrap();
        assert_eq!(sent.1["Account"], json!("rCaller"));
    }

    #[tokio::test]
    async fn test_sign_returns_blob_and_stamped_json() {
        let crossmark = adapter(FakeCrossmark::signed_in_as("rAbc123"));
        crossmark.sign_in().await.unwrap();

        let result = crossmark.sign(payload(json!({ "Amount": "10" }))).await.unwrap();
        assert_eq!(result.signed_tx, "CROSSMARK_BLOB");
        assert_eq!(result.tx_json, json!({ "Amount": "10", "Account": "rAbc123" }));
    }

    #[tokio::test]
    async fn test_logout_without_sdk_support_resolves() {
        let crossmark = adapter(FakeCrossmark::signed_in_as("rAbc123"));
        crossmark.sign_in().await.unwrap();

        assert_ok!(crossmark.as_logout().unwrap().logout().await);
        let err = assert_err!(crossmark.sign(payload(json!({ "Amount": "10" }))).await);
        assert_eq!(err, WalletConnectError::NotAuthenticated { wallet: WalletType::Crossmark });
    }
}
