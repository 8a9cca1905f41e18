//! Wallet Adapters for XRPL browser wallets
//!
//! Every supported wallet implements the [`WalletAdapter`] trait, giving the
//! facade one API for:
//! - Sign-in (returns the wallet's address)
//! - Signing a transaction without submitting it
//! - Signing and submitting a transaction
//! - Logout, where the wallet supports it ([`Logout`])
//!
//! Each adapter talks to its provider through an SDK trait (`GemWalletApi`,
//! `CrossmarkSdk`, `XummSdk`) whose raw JSON responses never leave the
//! adapter.

pub mod config;
pub mod crossmark;
pub mod error;
pub mod gemwallet;
pub mod sdks;
pub mod types;
pub mod xaman;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use crossmark::{CrossmarkAdapter, CrossmarkSdk};
pub use error::{Result, SdkError, WalletConnectError};
pub use gemwallet::{GemWalletAdapter, GemWalletApi};
pub use sdks::WalletSdks;
pub use types::*;
pub use xaman::{XamanAdapter, XummLoader, XummSdk};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::wasm_compat::{WasmCompatSend, WasmCompatSync};

/// Base trait for all wallet adapters
///
/// Adapters share session state behind `&self`, so one instance can be held
/// in an `Arc` by the facade. Concurrent calls on the same adapter are not
/// serialized: their SDK calls race.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait WalletAdapter: WasmCompatSend + WasmCompatSync {
    /// The wallet this adapter serves
    fn wallet_type(&self) -> WalletType;

    /// Address stored by the last successful sign-in
    async fn address(&self) -> Option<String>;

    /// Authenticate with the wallet
    async fn sign_in(&self) -> Result<SignInResult>;

    /// Sign a transaction and broadcast it
    async fn sign_and_submit(&self, payload: Payload) -> Result<SignAndSubmitResult>;

    /// Sign a transaction without submitting it
    async fn sign(&self, payload: Payload) -> Result<SignResult>;

    /// Logout capability, if the wallet has one
    fn as_logout(&self) -> Option<&dyn Logout> {
        None
    }
}

/// Optional logout capability of a [`WalletAdapter`]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Logout: WasmCompatSend + WasmCompatSync {
    /// Clear the local session; best-effort towards the provider
    async fn logout(&self) -> Result<()>;
}

/// Signed-in address of one adapter
///
/// The lock is only held to read or swap the address, never across an SDK
/// call.
#[derive(Debug)]
pub(crate) struct Session {
    wallet: WalletType,
    address: RwLock<Option<String>>,
}

impl Session {
    pub(crate) fn new(wallet: WalletType) -> Self {
        Self {
            wallet,
            address: RwLock::new(None),
        }
    }

    pub(crate) async fn address(&self) -> Option<String> {
        self.address.read().await.clone()
    }

    /// Address for signing, or `NotAuthenticated`
    pub(crate) async fn require_address(&self) -> Result<String> {
        match self.address().await {
            Some(address) => Ok(address),
            None => Err(WalletConnectError::NotAuthenticated {
                wallet: self.wallet,
            }),
        }
    }

    pub(crate) async fn set(&self, address: String) {
        *self.address.write().await = Some(address);
    }

    pub(crate) async fn clear(&self) {
        *self.address.write().await = None;
    }
}
