//! xrpl-wallet-connect - one interface over XRPL browser wallets
//!
//! Pick a wallet at runtime, then sign in, sign, or sign-and-submit through
//! [`WalletConnect`] without caring which provider the user chose.
//!
//! | Wallet     | Identifier  | Needs                |
//! |------------|-------------|----------------------|
//! | Gem Wallet | `gemwallet` | browser extension    |
//! | Crossmark  | `crossmark` | browser extension    |
//! | Xaman      | `xaman`     | public API key       |
//!
//! Outside a browser (or without the `browser` feature on wasm32) the
//! default SDKs report every wallet as not installed or unavailable; embed
//! your own SDK implementations with [`WalletConnect::with_sdks`].

pub mod connect;
pub mod wallet;
pub mod wasm_compat;

#[cfg(all(feature = "browser", target_arch = "wasm32"))]
pub mod browser;

pub use connect::WalletConnect;
pub use wallet::{
    Config, Logout, Payload, Result, SdkError, SignAndSubmitResult, SignInResult, SignResult,
    WalletAdapter, WalletConnectError, WalletSdks, WalletType,
};
