//! SDK handles handed to adapters as the facade constructs them

use std::sync::Arc;

use super::crossmark::{CrossmarkSdk, HostlessCrossmark};
use super::gemwallet::{GemWalletApi, HostlessGemWallet};
use super::xaman::{HostlessXummLoader, XummLoader};

/// One SDK per wallet provider
///
/// [`WalletSdks::default`] picks the browser bridges on `wasm32` builds with
/// the `browser` feature, and the hostless SDKs (never installed, never
/// loadable) everywhere else.
#[derive(Clone)]
pub struct WalletSdks {
    pub(crate) gemwallet: Arc<dyn GemWalletApi>,
    pub(crate) crossmark: Arc<dyn CrossmarkSdk>,
    pub(crate) xumm_loader: Arc<dyn XummLoader>,
}

impl WalletSdks {
    /// SDKs for a host with no browser: every sign-in fails as not installed
    /// or SDK unavailable.
    pub fn hostless() -> Self {
        Self {
            gemwallet: Arc::new(HostlessGemWallet),
            crossmark: Arc::new(HostlessCrossmark),
            xumm_loader: Arc::new(HostlessXummLoader),
        }
    }

    /// wasm-bindgen bridges to `@gemwallet/api`, `@crossmarkio/sdk` and `xumm`
    #[cfg(all(feature = "browser", target_arch = "wasm32"))]
    pub fn browser() -> Self {
        use crate::browser::{BrowserCrossmark, BrowserGemWallet, BrowserXummLoader};

        Self {
            gemwallet: Arc::new(BrowserGemWallet),
            crossmark: Arc::new(BrowserCrossmark),
            xumm_loader: Arc::new(BrowserXummLoader),
        }
    }

    pub fn with_gemwallet(mut self, api: Arc<dyn GemWalletApi>) -> Self {
        self.gemwallet = api;
        self
    }

    pub fn with_crossmark(mut self, sdk: Arc<dyn CrossmarkSdk>) -> Self {
        self.crossmark = sdk;
        self
    }

    pub fn with_xumm_loader(mut self, loader: Arc<dyn XummLoader>) -> Self {
        self.xumm_loader = loader;
        self
    }
}

impl Default for WalletSdks {
    #[cfg(all(feature = "browser", target_arch = "wasm32"))]
    fn default() -> Self {
        Self::browser()
    }

    #[cfg(not(all(feature = "browser", target_arch = "wasm32")))]
    fn default() -> Self {
        Self::hostless()
    }
}

impl std::fmt::Debug for WalletSdks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSdks").finish_non_exhaustive()
    }
}
