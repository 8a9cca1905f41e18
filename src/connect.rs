//! Wallet connect facade
//!
//! Holds the configuration, lazily builds at most one adapter per wallet
//! type, tracks the selected wallet, and forwards every call to it.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::wallet::{
    Config, CrossmarkAdapter, GemWalletAdapter, Payload, Result, SignAndSubmitResult,
    SignInResult, SignResult, WalletAdapter, WalletConnectError, WalletSdks, WalletType,
    XamanAdapter,
};

/// Single entry point over every supported wallet
///
/// ```rust,ignore
/// let mut connect = WalletConnect::new(Config::new().with_xaman_api_key("your-xaman-api-key"));
/// connect.select_wallet("xaman")?;
/// let SignInResult { address, .. } = connect.sign_in().await?;
/// ```
///
/// Selection never resets a wallet's session: switching away and back keeps
/// the cached adapter and its signed-in address. Calls are forwarded as-is
/// and are not serialized; concurrent calls on one wallet race in its SDK.
pub struct WalletConnect {
    config: Config,
    sdks: WalletSdks,
    selected: Option<WalletType>,
    adapters: BTreeMap<WalletType, Arc<dyn WalletAdapter>>,
}

impl WalletConnect {
    /// Facade over the host's default SDKs
    pub fn new(config: Config) -> Self {
        Self::with_sdks(config, WalletSdks::default())
    }

    /// Facade over caller-supplied SDKs
    pub fn with_sdks(config: Config, sdks: WalletSdks) -> Self {
        Self {
            config,
            sdks,
            selected: None,
            adapters: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Select a wallet by its canonical lowercase identifier.
    ///
    /// Identifiers are case-sensitive: `"xaman"` selects Xaman, `"Xaman"`
    /// fails with [`WalletConnectError::UnsupportedWallet`].
    pub fn select_wallet(&mut self, wallet: &str) -> Result<()> {
        let wallet = wallet.parse::<WalletType>().map_err(|e| {
            warn!(%wallet, "Unsupported wallet selected");
            e
        })?;
        self.select(wallet)
    }

    /// Select a wallet, building its adapter on first use.
    ///
    /// Fails with [`WalletConnectError::Configuration`] before anything is
    /// built when the wallet needs a credential the config lacks. A failed
    /// selection keeps the previous one.
    pub fn select(&mut self, wallet: WalletType) -> Result<()> {
        self.config
            .require_credentials(wallet)
            .map_err(WalletConnectError::Configuration)?;

        if !self.adapters.contains_key(&wallet) {
            let adapter = self.build_adapter(wallet)?;
            self.adapters.insert(wallet, adapter);
            debug!(%wallet, "Adapter constructed");
        }

        self.selected = Some(wallet);
        info!(%wallet, "Wallet selected");
        Ok(())
    }

    /// Currently selected wallet
    pub fn selected(&self) -> Option<WalletType> {
        self.selected
    }

    /// Whether an adapter has been built for `wallet`
    pub fn is_cached(&self, wallet: WalletType) -> bool {
        self.adapters.contains_key(&wallet)
    }

    /// Wallets with a cached adapter, in `WalletType` order
    pub fn cached_wallets(&self) -> Vec<WalletType> {
        self.adapters.keys().copied().collect()
    }

    /// Cached adapter for `wallet`
    pub fn adapter(&self, wallet: WalletType) -> Option<Arc<dyn WalletAdapter>> {
        self.adapters.get(&wallet).cloned()
    }

    /// Adapter of the selected wallet, or `NotSelected`
    pub fn active_adapter(&self) -> Result<Arc<dyn WalletAdapter>> {
        self.selected
            .and_then(|wallet| self.adapter(wallet))
            .ok_or(WalletConnectError::NotSelected)
    }

    /// Sign in with the selected wallet
    pub async fn sign_in(&self) -> Result<SignInResult> {
        let adapter = self.active_adapter()?;
        debug!(wallet = %adapter.wallet_type(), "Forwarding sign-in");
        adapter.sign_in().await
    }

    /// Sign and submit a transaction with the selected wallet
    pub async fn sign_and_submit(&self, payload: Payload) -> Result<SignAndSubmitResult> {
        let adapter = self.active_adapter()?;
        debug!(wallet = %adapter.wallet_type(), "Forwarding sign-and-submit");
        adapter.sign_and_submit(payload).await
    }

    /// Sign a transaction (without submitting) with the selected wallet
    pub async fn sign(&self, payload: Payload) -> Result<SignResult> {
        let adapter = self.active_adapter()?;
        debug!(wallet = %adapter.wallet_type(), "Forwarding sign");
        adapter.sign(payload).await
    }

    /// Logout from the selected wallet; a no-op if it has no logout.
    pub async fn logout(&self) -> Result<()> {
        let adapter = self.active_adapter()?;
        match adapter.as_logout() {
            Some(session) => session.logout().await,
            None => {
                debug!(wallet = %adapter.wallet_type(), "Wallet has no logout, nothing to do");
                Ok(())
            }
        }
    }

    /// Construction is synchronous and never talks to the wallet.
    fn build_adapter(&self, wallet: WalletType) -> Result<Arc<dyn WalletAdapter>> {
        let adapter: Arc<dyn WalletAdapter> = match wallet {
            WalletType::GemWallet => Arc::new(GemWalletAdapter::new(self.sdks.gemwallet.clone())),
            WalletType::Crossmark => Arc::new(CrossmarkAdapter::new(self.sdks.crossmark.clone())),
            WalletType::Xaman => {
                let api_key = self.config.xaman_api_key().ok_or_else(|| {
                    WalletConnectError::Configuration(
                        "Xaman wallet requires a public API key".to_string(),
                    )
                })?;
                Arc::new(XamanAdapter::new(api_key, self.sdks.xumm_loader.clone()))
            }
        };
        Ok(adapter)
    }

    #[cfg(test)]
    fn insert_adapter(&mut self, adapter: Arc<dyn WalletAdapter>) {
        self.adapters.insert(adapter.wallet_type(), adapter);
    }
}

impl Default for WalletConnect {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl std::fmt::Debug for WalletConnect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConnect")
            .field("config", &self.config)
            .field("selected", &self.selected)
            .field("cached", &self.cached_wallets())
            .finish()
    }
}
