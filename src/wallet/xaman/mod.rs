//! Xaman Adapter
//!
//! Xaman (formerly Xumm) is a mobile wallet reached through the `xumm` SDK.
//! The SDK is loaded lazily, once: the first operation starts the load and
//! every concurrent caller awaits that same load. A failed load is final for
//! the adapter's lifetime.

mod sdk;

pub use sdk::{HostlessXummLoader, XummLoader, XummSdk};

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::wallet::types::lookup_str;
use crate::wallet::{
    Logout, Payload, Result, Session, SignAndSubmitResult, SignInResult, SignResult,
    WalletAdapter, WalletConnectError, WalletType,
};

const WALLET: WalletType = WalletType::Xaman;

type LoadedSdk = std::result::Result<Arc<dyn XummSdk>, String>;

/// Adapter over the Xumm SDK
pub struct XamanAdapter {
    api_key: String,
    loader: Arc<dyn XummLoader>,
    sdk: OnceCell<LoadedSdk>,
    session: Session,
}

/// What a signature request is for; picks the error variant
#[derive(Clone, Copy)]
enum Request {
    Sign,
    Submit,
}

impl Request {
    fn error(self, message: impl Into<String>) -> WalletConnectError {
        let message = message.into();
        match self {
            Request::Sign => WalletConnectError::Signing {
                wallet: WALLET,
                message,
            },
            Request::Submit => WalletConnectError::Submission {
                wallet: WALLET,
                message,
            },
        }
    }
}

impl XamanAdapter {
    /// Construction never touches the SDK; loading starts on first use.
    pub fn new(api_key: impl Into<String>, loader: Arc<dyn XummLoader>) -> Self {
        Self {
            api_key: api_key.into(),
            loader,
            sdk: OnceCell::new(),
            session: Session::new(WALLET),
        }
    }

    /// Whether the one-time SDK load has finished (successfully or not)
    pub fn is_sdk_initialized(&self) -> bool {
        self.sdk.initialized()
    }

    async fn sdk(&self) -> Result<Arc<dyn XummSdk>> {
        let loaded = self
            .sdk
            .get_or_init(|| async {
                debug!("Loading Xumm SDK");
                self.loader.load(&self.api_key).await.map_err(|e| {
                    warn!(error = %e, "Xumm SDK failed to load");
                    e.to_string()
                })
            })
            .await;

        match loaded {
            Ok(sdk) => Ok(Arc::clone(sdk)),
            Err(reason) => Err(WalletConnectError::SdkUnavailable {
                wallet: WALLET,
                reason: reason.clone(),
            }),
        }
    }

    /// Push the payload to Xaman and wait for the user's decision.
    ///
    /// Returns the resolved record, guaranteed to have `signed == true`.
    async fn request_signature(&self, payload: Payload, request: Request) -> Result<Value> {
        let sdk = self.sdk().await?;
        let address = self.session.require_address().await?;
        let transaction = payload.with_default_account(&address);

        let response = sdk
            .create_and_subscribe(transaction.into_value())
            .await
            .map_err(|e| request.error(e.to_string()))?;

        match response.get("resolved") {
            Some(resolved) if resolved.get("signed") == Some(&Value::Bool(true)) => {
                Ok(resolved.clone())
            }
            _ => Err(request.error("user rejected or did not sign the transaction")),
        }
    }
}

impl std::fmt::Debug for XamanAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XamanAdapter")
            .field("api_key", &"[REDACTED]")
            .field("sdk_initialized", &self.sdk.initialized())
            .field("session", &self.session)
            .finish()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl WalletAdapter for XamanAdapter {
    fn wallet_type(&self) -> WalletType {
        WALLET
    }

    async fn address(&self) -> Option<String> {
        self.session.address().await
    }

    async fn sign_in(&self) -> Result<SignInResult> {
        let sdk = self.sdk().await?;

        let auth_error = |message: String| WalletConnectError::Authentication {
            wallet: WALLET,
            message,
        };
        sdk.authorize().await.map_err(|e| auth_error(e.to_string()))?;
        let address = sdk
            .account()
            .await
            .map_err(|e| auth_error(e.to_string()))?
            .filter(|account| !account.is_empty())
            .ok_or_else(|| auth_error("no account returned after authorization".to_string()))?;

        self.session.set(address.clone()).await;
        info!(wallet = %WALLET, %address, "Signed in");
        Ok(SignInResult {
            wallet: WALLET,
            address,
        })
    }

    async fn sign_and_submit(&self, payload: Payload) -> Result<SignAndSubmitResult> {
        debug!(wallet = %WALLET, "Submitting transaction");
        let resolved = self.request_signature(payload, Request::Submit).await?;

        let hash = lookup_str(&resolved, &["/txid"])
            .ok_or_else(|| Request::Submit.error("signed, but no transaction id (txid) in response"))?
            .to_string();

        Ok(SignAndSubmitResult {
            hash,
            result: resolved,
        })
    }

    async fn sign(&self, payload: Payload) -> Result<SignResult> {
        debug!(wallet = %WALLET, "Signing transaction");
        let resolved = self.request_signature(payload, Request::Sign).await?;

        let signed_tx = lookup_str(&resolved, &["/signed_blob"])
            .ok_or_else(|| Request::Sign.error("signed, but no signed_blob in response"))?
            .to_string();
        let tx_json = resolved
            .get("response")
            .filter(|response| !response.is_null())
            .cloned()
            .ok_or_else(|| Request::Sign.error("signed, but no transaction JSON in response"))?;

        Ok(SignResult { signed_tx, tx_json })
    }

    fn as_logout(&self) -> Option<&dyn Logout> {
        Some(self)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Logout for XamanAdapter {
    /// Clears the local session first, then revokes the SDK session.
    async fn logout(&self) -> Result<()> {
        let sdk = self.sdk().await?;
        self.session.clear().await;

        sdk.logout().await.map_err(|e| WalletConnectError::Logout {
            wallet: WALLET,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::testing::{FakeXumm, FakeXummLoader};
    use serde_json::json;
    use std::sync::atomic::Ordering;
    use tokio_test::{assert_err, assert_ok};

    fn payload(value: Value) -> Payload {
        Payload::try_from(value).unwrap()
    }

    #[tokio::test]
    async fn test_construction_does_not_load_sdk() {
        let loader = FakeXummLoader::new(FakeXumm::authorizing("rAbc123"));
        let loads = loader.loads.clone();
        let xaman = XamanAdapter::new("key", Arc::new(loader));

        assert!(!xaman.is_sdk_initialized());
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_load() {
        let loader = FakeXummLoader::new(FakeXumm::authorizing("rAbc123"));
        let loads = loader.loads.clone();
        let xaman = XamanAdapter::new("key", Arc::new(loader));

        let (a, b, c) = tokio::join!(
            xaman.sign_in(),
            xaman.sign_in(),
            xaman.sign(payload(json!({ "Amount": "10" })))
        );
        assert_ok!(a);
        assert_ok!(b);
        // No ordering between the racing calls, so `c` may or may not see the session.
        let _ = c;
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(xaman.is_sdk_initialized());
    }

    #[tokio::test]
    async fn test_hostless_loader_reports_sdk_unavailable() {
        let xaman = XamanAdapter::new("key", Arc::new(HostlessXummLoader));

        let err = assert_err!(xaman.sign_in().await);
        assert!(matches!(err, WalletConnectError::SdkUnavailable { wallet: WalletType::Xaman, .. }));
        assert!(err.to_string().contains("SDK not available"));

        // Every later operation fails the same way, before the session check.
        let err = assert_err!(xaman.sign(payload(json!({ "Amount": "10" }))).await);
        assert!(matches!(err, WalletConnectError::SdkUnavailable { .. }));
        let err = assert_err!(xaman.as_logout().unwrap().logout().await);
        assert!(matches!(err, WalletConnectError::SdkUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_sign_before_sign_in() {
        let xaman = XamanAdapter::new(
            "key",
            Arc::new(FakeXummLoader::new(FakeXumm::authorizing("rAbc123"))),
        );

        let err = assert_err!(xaman.sign_and_submit(payload(json!({ "Amount": "10" }))).await);
        assert_eq!(err, WalletConnectError::NotAuthenticated { wallet: WalletType::Xaman });
    }

    #[tokio::test]
    async fn test_sign_in_without_account() {
        let mut xumm = FakeXumm::authorizing("rAbc123");
        xumm.account = None;
        let xaman = XamanAdapter::new("key", Arc::new(FakeXummLoader::new(xumm)));

        let err = assert_err!(xaman.sign_in().await);
        assert!(matches!(err, WalletConnectError::Authentication { .. }));
    }

    #[tokio::test]
    async fn test_submit_stamps_account_and_returns_txid() {
        let xumm = FakeXumm::authorizing("rAbc123");
        let sent = xumm.sent.clone();
        let xaman = XamanAdapter::new("key", Arc::new(FakeXummLoader::new(xumm)));
        xaman.sign_in().await.unwrap();

        let result = xaman
            .sign_and_submit(payload(json!({ "TransactionType": "Payment", "Amount": "10" })))
            .await
            .unwrap();
        assert_eq!(result.hash, "XAMANTXID");
        assert_eq!(result.result["signed"], json!(true));
        assert_eq!(sent.lock().unwrap()[0]["Account"], json!("rAbc123"));
    }

    #[tokio::test]
    async fn test_rejected_payload() {
        let mut xumm = FakeXumm::authorizing("rAbc123");
        xumm.resolved = json!({ "resolved": { "signed": false } });
        let xaman = XamanAdapter::new("key", Arc::new(FakeXummLoader::new(xumm)));
        xaman.sign_in().await.unwrap();

        let err = assert_err!(xaman.sign(payload(json!({ "Amount": "10" }))).await);
        assert!(matches!(err, WalletConnectError::Signing { ref message, .. }
            if message.contains("rejected")));
        let err = assert_err!(xaman.sign_and_submit(payload(json!({ "Amount": "10" }))).await);
        assert!(matches!(err, WalletConnectError::Submission { .. }));
    }

    #[tokio::test]
    async fn test_missing_txid_is_submission_error() {
        let mut xumm = FakeXumm::authorizing("rAbc123");
        xumm.resolved = json!({ "resolved": { "signed": true, "signed_blob": "BLOB" } });
        let xaman = XamanAdapter::new("key", Arc::new(FakeXummLoader::new(xumm)));
        xaman.sign_in().await.unwrap();

        let err = assert_err!(xaman.sign_and_submit(payload(json!({ "Amount": "10" }))).await);
        assert!(matches!(err, WalletConnectError::Submission { .. }));
    }

    #[tokio::test]
    async fn test_sign_returns_blob_and_response_json() {
        let xaman = XamanAdapter::new(
            "key",
            Arc::new(FakeXummLoader::new(FakeXumm::authorizing("rAbc123"))),
        );
        xaman.sign_in().await.unwrap();

        let result = xaman.sign(payload(json!({ "Amount": "10" }))).await.unwrap();
        assert_eq!(result.signed_tx, "XAMANBLOB");
        assert_eq!(result.tx_json["account"], json!("rAbc123"));
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_calls_sdk() {
        let xumm = FakeXumm::authorizing("rAbc123");
        let logouts = xumm.logouts.clone();
        let xaman = XamanAdapter::new("key", Arc::new(FakeXummLoader::new(xumm)));
        xaman.sign_in().await.unwrap();

        assert_ok!(xaman.as_logout().unwrap().logout().await);
        assert_eq!(xaman.address().await, None);
        assert_eq!(logouts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let xaman = XamanAdapter::new("super-secret", Arc::new(HostlessXummLoader));
        assert!(!format!("{:?}", xaman).contains("super-secret"));
    }
}
