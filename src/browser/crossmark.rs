//! `@crossmarkio/sdk` bridge

use async_trait::async_trait;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use super::{call_path, from_js, lookup_function, to_js};
use crate::wallet::{CrossmarkSdk, SdkError};

#[wasm_bindgen(module = "@crossmarkio/sdk")]
extern "C" {
    #[wasm_bindgen(thread_local_v2, js_name = default)]
    static SDK: JsValue;
}

/// Install checks, newest SDK layout first
const INSTALL_CHECKS: [&[&str]; 2] = [&["sync", "isInstalled"], &["isInstalled"]];

/// Crossmark through the SDK's default export
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserCrossmark;

fn sdk() -> JsValue {
    SDK.with(JsValue::clone)
}

async fn call(method: &[&str], args: &[JsValue]) -> Result<Value, SdkError> {
    let name = method.join(".");
    let value = call_path(&sdk(), method, args).await?;
    from_js(&name, value)
}

#[async_trait(?Send)]
impl CrossmarkSdk for BrowserCrossmark {
    fn is_installed(&self) -> Option<bool> {
        let sdk = sdk();
        INSTALL_CHECKS.iter().find_map(|path| {
            let (this, check) = lookup_function(&sdk, path)?;
            check.call0(&this).ok().and_then(|installed| installed.as_bool())
        })
    }

    async fn sign_in_and_wait(&self) -> Result<Value, SdkError> {
        call(&["methods", "signInAndWait"], &[]).await
    }

    async fn sign_and_submit_and_wait(&self, transaction: Value) -> Result<Value, SdkError> {
        call(&["methods", "signAndSubmitAndWait"], &[to_js(&transaction)?]).await
    }

    async fn sign_and_wait(&self, transaction: Value) -> Result<Value, SdkError> {
        call(&["methods", "signAndWait"], &[to_js(&transaction)?]).await
    }
}
