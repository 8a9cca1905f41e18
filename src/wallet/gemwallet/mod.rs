//! Gem Wallet Adapter
//!
//! Gem Wallet is a browser extension. Installation can be checked before
//! sign-in; every call round-trips through the extension.

mod api;

pub use api::{GemWalletApi, HostlessGemWallet};

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::wallet::types::lookup_str;
use crate::wallet::{
    Logout, Payload, Result, Session, SignAndSubmitResult, SignInResult, SignResult,
    WalletAdapter, WalletConnectError, WalletType,
};

const WALLET: WalletType = WalletType::GemWallet;

/// Adapter over the `@gemwallet/api` module
pub struct GemWalletAdapter {
    api: Arc<dyn GemWalletApi>,
    session: Session,
}

impl GemWalletAdapter {
    pub fn new(api: Arc<dyn GemWalletApi>) -> Self {
        Self {
            api,
            session: Session::new(WALLET),
        }
    }
}

impl std::fmt::Debug for GemWalletAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GemWalletAdapter")
            .field("session", &self.session)
            .finish()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl WalletAdapter for GemWalletAdapter {
    fn wallet_type(&self) -> WalletType {
        WALLET
    }

    async fn address(&self) -> Option<String> {
        self.session.address().await
    }

    async fn sign_in(&self) -> Result<SignInResult> {
        let installed = self.api.is_installed().await.map_err(|e| {
            WalletConnectError::Authentication {
                wallet: WALLET,
                message: e.to_string(),
            }
        })?;
        if installed.pointer("/result/isInstalled") != Some(&json!(true)) {
            warn!("Gem Wallet extension not detected");
            return Err(WalletConnectError::NotInstalled { wallet: WALLET });
        }

        let response = self.api.get_address().await.map_err(|e| {
            WalletConnectError::Authentication {
                wallet: WALLET,
                message: e.to_string(),
            }
        })?;
        let address = lookup_str(&response, &["/result/address"])
            .ok_or_else(|| WalletConnectError::Authentication {
                wallet: WALLET,
                message: "unable to get address from Gem Wallet".to_string(),
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
            .api
            .submit_transaction(transaction.into_value())
            .await
            .map_err(|e| WalletConnectError::Submission {
                wallet: WALLET,
                message: e.to_string(),
            })?;

        let hash = lookup_str(&response, &["/result/hash"])
            .ok_or_else(|| WalletConnectError::Submission {
                wallet: WALLET,
                message: "transaction failed or was rejected (no hash in response)".to_string(),
            })?
            .to_string();

        let result = response.get("result").cloned().unwrap_or_default();
        Ok(SignAndSubmitResult { hash, result })
    }

    async fn sign(&self, payload: Payload) -> Result<SignResult> {
        let address = self.session.require_address().await?;
        let transaction = payload.with_default_account(&address);
        debug!(wallet = %WALLET, "Signing transaction");

        let response = self
            .api
            .sign_transaction(transaction.clone().into_value())
            .await
            .map_err(|e| WalletConnectError::Signing {
                wallet: WALLET,
                message: e.to_string(),
            })?;

        let signed_tx = lookup_str(&response, &["/result/signature"])
            .ok_or_else(|| WalletConnectError::Signing {
                wallet: WALLET,
                message: "signing failed or was rejected (no signature in response)".to_string(),
            })?
            .to_string();

        Ok(SignResult {
            signed_tx,
            tx_json: transaction.into_value(),
        })
    }

    fn as_logout(&self) -> Option<&dyn Logout> {
        Some(self)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Logout for GemWalletAdapter {
    /// The extension has no logout; only the local session is cleared.
    async fn logout(&self) -> Result<()> {
        self.session.clear().await;
        Ok(())
    }
}
