//! Common types for wallet adapters
//!
//! These types give every wallet the same result shapes, whatever its SDK
//! returns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::WalletConnectError;

/// Supported wallet integrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    GemWallet,
    Crossmark,
    Xaman,
}

impl WalletType {
    pub const ALL: [WalletType; 3] = [WalletType::GemWallet, WalletType::Crossmark, WalletType::Xaman];

    /// Canonical lowercase identifier accepted by `select_wallet`
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletType::GemWallet => "gemwallet",
            WalletType::Crossmark => "crossmark",
            WalletType::Xaman => "xaman",
        }
    }

    /// Human-readable name used in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            WalletType::GemWallet => "Gem Wallet",
            WalletType::Crossmark => "Crossmark",
            WalletType::Xaman => "Xaman",
        }
    }

    /// Whether the wallet needs a public API key in [`Config`](super::Config)
    pub fn requires_api_key(&self) -> bool {
        matches!(self, WalletType::Xaman)
    }
}

impl std::fmt::Display for WalletType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WalletType {
    type Err = WalletConnectError;

    /// Case-sensitive: only the canonical lowercase identifiers parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WalletType::ALL
            .into_iter()
            .find(|wallet| wallet.as_str() == s)
            .ok_or_else(|| WalletConnectError::UnsupportedWallet(s.to_string()))
    }
}

/// Result of a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResult {
    pub wallet: WalletType,
    pub address: String,
}

/// Result of a signed and submitted transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignAndSubmitResult {
    /// Transaction hash
    pub hash: String,
    /// Raw provider result
    pub result: Value,
}

/// Result of signing without submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResult {
    /// Signed transaction blob
    pub signed_tx: String,
    /// Transaction JSON that was signed
    pub tx_json: Value,
}

/// A transaction handed to a wallet for signing
///
/// Opaque apart from its `Account` field, which adapters stamp with the
/// signed-in address when the caller left it out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub const ACCOUNT: &'static str = "Account";

    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Caller-supplied `Account`, if present and non-empty
    pub fn account(&self) -> Option<&str> {
        self.0
            .get(Self::ACCOUNT)
            .and_then(Value::as_str)
            .filter(|account| !account.is_empty())
    }

    /// Set `Account` to `address` unless the caller already supplied one.
    ///
    /// A missing, `null` or empty `Account` counts as omitted.
    pub fn with_default_account(mut self, address: &str) -> Self {
        let omitted = match self.0.get(Self::ACCOUNT) {
            None | Some(Value::Null) => true,
            Some(Value::String(account)) => account.is_empty(),
            Some(_) => false,
        };
        if omitted {
            self.0
                .insert(Self::ACCOUNT.to_string(), Value::String(address.to_string()));
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for Payload {
    type Error = WalletConnectError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(WalletConnectError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        payload.into_value()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// First non-empty string found at any of `pointers`, tried in order
pub(crate) fn lookup_str<'a>(response: &'a Value, pointers: &[&str]) -> Option<&'a str> {
    pointers
        .iter()
        .filter_map(|pointer| response.pointer(pointer))
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
}
