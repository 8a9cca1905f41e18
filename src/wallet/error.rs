//! Wallet Connect Error Types
//!
//! Unified error handling for the facade and every wallet adapter.

use super::types::WalletType;

/// Errors surfaced by [`WalletConnect`](crate::WalletConnect) and the wallet adapters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletConnectError {
    /// A credential the selected wallet needs is missing from the config
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Selector did not name a supported wallet
    #[error("Unsupported wallet type: {0:?}")]
    UnsupportedWallet(String),

    /// Operation issued before `select_wallet`
    #[error("No wallet selected. Call select_wallet() first.")]
    NotSelected,

    /// Signing or submission issued before a successful sign-in
    #[error("{}: not signed in. Please sign in first.", .wallet.display_name())]
    NotAuthenticated { wallet: WalletType },

    /// The wallet extension is not installed or not active
    #[error("{} extension is not installed or not active", .wallet.display_name())]
    NotInstalled { wallet: WalletType },

    /// The wallet SDK could not be initialized on this host
    #[error("{} SDK not available: {reason}", .wallet.display_name())]
    SdkUnavailable { wallet: WalletType, reason: String },

    /// Sign-in was declined, unreachable, or returned no address
    #[error("{} sign-in failed: {message}", .wallet.display_name())]
    Authentication { wallet: WalletType, message: String },

    /// Signing was rejected or the response lacked the signed blob
    #[error("{} signing failed: {message}", .wallet.display_name())]
    Signing { wallet: WalletType, message: String },

    /// Submission was rejected or the response lacked a hash
    #[error("{} submission failed: {message}", .wallet.display_name())]
    Submission { wallet: WalletType, message: String },

    /// The SDK's logout call failed (local session is already cleared)
    #[error("{} logout failed: {message}", .wallet.display_name())]
    Logout { wallet: WalletType, message: String },

    /// Transaction payload was not a JSON object
    #[error("Invalid transaction payload: {0}")]
    InvalidPayload(String),
}

impl WalletConnectError {
    /// True for every way a sign-in can fail: not installed, SDK missing, or rejected.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            WalletConnectError::NotInstalled { .. }
                | WalletConnectError::SdkUnavailable { .. }
                | WalletConnectError::Authentication { .. }
        )
    }

    /// The wallet the error was raised for, if it is wallet-specific
    pub fn wallet(&self) -> Option<WalletType> {
        match self {
            WalletConnectError::NotAuthenticated { wallet }
            | WalletConnectError::NotInstalled { wallet }
            | WalletConnectError::SdkUnavailable { wallet, .. }
            | WalletConnectError::Authentication { wallet, .. }
            | WalletConnectError::Signing { wallet, .. }
            | WalletConnectError::Submission { wallet, .. }
            | WalletConnectError::Logout { wallet, .. } => Some(*wallet),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, WalletConnectError>;

/// Errors returned by the SDK boundary traits
///
/// Adapters never pass these through; they wrap them into a
/// [`WalletConnectError`] that names the wallet and the failed operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// The SDK or extension does not exist in this host
    #[error("{0}")]
    Unavailable(String),

    /// The SDK call threw or its promise rejected
    #[error("`{method}` failed: {message}")]
    Call { method: String, message: String },
}

impl SdkError {
    pub fn call(method: &str, message: impl Into<String>) -> Self {
        SdkError::Call {
            method: method.to_string(),
            message: message.into(),
        }
    }
}
