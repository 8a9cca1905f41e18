//! In-memory SDK fakes for adapter and facade tests

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{CrossmarkSdk, GemWalletApi, SdkError, WalletSdks, XummLoader, XummSdk};

/// Gem Wallet fake; `seen` records every transaction sent to the extension
#[derive(Clone)]
pub struct FakeGemWallet {
    pub installed: bool,
    pub address_response: Value,
    pub submit_response: Value,
    pub sign_response: Value,
    pub seen: Arc<Mutex<Vec<Value>>>,
}

impl FakeGemWallet {
    pub fn signed_in_as(address: &str) -> Self {
        Self {
            installed: true,
            address_response: json!({ "type": "response", "result": { "address": address } }),
            submit_response: json!({ "type": "response", "result": { "hash": "GEMHASH" } }),
            sign_response: json!({ "type": "response", "result": { "signature": "SIGNED_BLOB" } }),
            seen: Arc::default(),
        }
    }

    pub fn not_installed() -> Self {
        Self {
            installed: false,
            ..Self::signed_in_as("rUnused")
        }
    }
}

#[async_trait]
impl GemWalletApi for FakeGemWallet {
    async fn is_installed(&self) -> Result<Value, SdkError> {
        Ok(json!({ "type": "response", "result": { "isInstalled": self.installed } }))
    }

    async fn get_address(&self) -> Result<Value, SdkError> {
        Ok(self.address_response.clone())
    }

    async fn submit_transaction(&self, transaction: Value) -> Result<Value, SdkError> {
        self.seen.lock().unwrap().push(transaction);
        Ok(self.submit_response.clone())
    }

    async fn sign_transaction(&self, transaction: Value) -> Result<Value, SdkError> {
        self.seen.lock().unwrap().push(transaction);
        Ok(self.sign_response.clone())
    }
}

/// Crossmark fake; `calls` records `(method, transaction)` pairs
#[derive(Clone)]
pub struct FakeCrossmark {
    pub installed: Option<bool>,
    pub fail_with: Option<SdkError>,
    pub address: String,
    pub submit_response: Value,
    pub sign_response: Value,
    pub calls: Arc<Mutex<Vec<(&'static str, Value)>>>,
}

impl FakeCrossmark {
    pub fn signed_in_as(address: &str) -> Self {
        Self {
            installed: Some(true),
            fail_with: None,
            address: address.to_string(),
            submit_response: json!({
                "response": { "data": { "resp": { "result": { "hash": "CROSSMARKHASH" } } } }
            }),
            sign_response: json!({ "response": { "data": { "txBlob": "CROSSMARK_BLOB" } } }),
            calls: Arc::default(),
        }
    }

    fn record(&self, method: &'static str, transaction: Value) -> Result<(), SdkError> {
        self.calls.lock().unwrap().push((method, transaction));
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CrossmarkSdk for FakeCrossmark {
    fn is_installed(&self) -> Option<bool> {
        self.installed
    }

    async fn sign_in_and_wait(&self) -> Result<Value, SdkError> {
        self.record("signInAndWait", Value::Null)?;
        Ok(json!({ "response": { "data": { "address": self.address } } }))
    }

    async fn sign_and_submit_and_wait(&self, transaction: Value) -> Result<Value, SdkError> {
        self.record("signAndSubmitAndWait", transaction)?;
        Ok(self.submit_response.clone())
    }

    async fn sign_and_wait(&self, transaction: Value) -> Result<Value, SdkError> {
        self.record("signAndWait", transaction)?;
        Ok(self.sign_response.clone())
    }
}

/// Xumm SDK fake; `sent` records payloads, `logouts` counts logout calls
#[derive(Clone)]
pub struct FakeXumm {
    pub account: Option<String>,
    pub resolved: Value,
    pub sent: Arc<Mutex<Vec<Value>>>,
    pub logouts: Arc<AtomicUsize>,
}

impl FakeXumm {
    pub fn authorizing(account: &str) -> Self {
        Self {
            account: Some(account.to_string()),
            resolved: json!({
                "resolved": {
                    "signed": true,
                    "txid": "XAMANTXID",
                    "signed_blob": "XAMANBLOB",
                    "response": { "account": account, "txid": "XAMANTXID" }
                }
            }),
            sent: Arc::default(),
            logouts: Arc::default(),
        }
    }
}

#[async_trait]
impl XummSdk for FakeXumm {
    async fn authorize(&self) -> Result<(), SdkError> {
        tokio::task::yield_now().await;
        Ok(())
    }

    async fn account(&self) -> Result<Option<String>, SdkError> {
        Ok(self.account.clone())
    }

    async fn create_and_subscribe(&self, transaction: Value) -> Result<Value, SdkError> {
        self.sent.lock().unwrap().push(transaction);
        Ok(self.resolved.clone())
    }

    async fn logout(&self) -> Result<(), SdkError> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Loader handing out one [`FakeXumm`]; `loads` counts load attempts
pub struct FakeXummLoader {
    sdk: FakeXumm,
    pub loads: Arc<AtomicUsize>,
}

impl FakeXummLoader {
    pub fn new(sdk: FakeXumm) -> Self {
        Self {
            sdk,
            loads: Arc::default(),
        }
    }
}

#[async_trait]
impl XummLoader for FakeXummLoader {
    async fn load(&self, _api_key: &str) -> Result<Arc<dyn XummSdk>, SdkError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        // Give concurrent callers a chance to pile up on the in-flight load.
        tokio::task::yield_now().await;
        Ok(Arc::new(self.sdk.clone()))
    }
}

/// SDK set where every wallet is installed and signs in as `address`
pub fn fake_sdks(address: &str) -> WalletSdks {
    WalletSdks::hostless()
        .with_gemwallet(Arc::new(FakeGemWallet::signed_in_as(address)))
        .with_crossmark(Arc::new(FakeCrossmark::signed_in_as(address)))
        .with_xumm_loader(Arc::new(FakeXummLoader::new(FakeXumm::authorizing(address))))
}
