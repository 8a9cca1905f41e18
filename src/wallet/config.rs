//! Facade configuration
//!
//! Per-wallet credentials, supplied once when the facade is built.

use serde::{Deserialize, Deserializer};

use super::types::WalletType;

/// Credentials for the wallets that need them
///
/// Only Xaman needs one today: a public API key from the Xumm developer
/// console.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, deserialize_with = "non_empty")]
    xaman_api_key: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Xaman API key. An empty key counts as no key.
    pub fn with_xaman_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.xaman_api_key = (!api_key.is_empty()).then_some(api_key);
        self
    }

    pub fn xaman_api_key(&self) -> Option<&str> {
        self.xaman_api_key.as_deref()
    }

    /// The credential `wallet` needs, or `Err` naming what is missing.
    pub(crate) fn require_credentials(&self, wallet: WalletType) -> Result<(), String> {
        if wallet.requires_api_key() && self.xaman_api_key.is_none() {
            return Err(format!(
                "{} wallet requires a public API key",
                wallet.display_name()
            ));
        }
        Ok(())
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "xaman_api_key",
                &self.xaman_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
