//! `window.ethereum` binding for the browser build.
//!
//! Probes the injected provider once and forwards EIP-1193 requests through
//! `js-sys`. Request/response payloads cross the JS boundary as JSON text so
//! the rest of the crate only ever sees `serde_json::Value`.

use js_sys::{Function, JSON, Object, Promise, Reflect};
use serde_json::{Value, json};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::wallet::{Eip1193, WalletError};

/// The wallet object injected by a browser extension (`MetaMask` et al.).
#[derive(Clone, Debug)]
pub struct BrowserWallet {
    ethereum: Object,
}

impl BrowserWallet {
    /// Look up `window.ethereum`. `None` when no wallet extension is present.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let value = match Reflect::get(&window, &JsValue::from_str("ethereum")) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("window.ethereum lookup failed: {e:?}");
                return None;
            }
        };
        if value.is_undefined() || value.is_null() {
            return None;
        }
        log::debug!("found injected ethereum provider");
        Some(Self { ethereum: value.unchecked_into() })
    }
}

impl Eip1193 for BrowserWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let request: Function = Reflect::get(&self.ethereum, &JsValue::from_str("request"))
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| WalletError::Unsupported)?;

        let payload = json!({ "method": method, "params": params }).to_string();
        let args = JSON::parse(&payload).map_err(js_error)?;
        let promise: Promise = request
            .call1(&self.ethereum, &args)
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| WalletError::Unsupported)?;

        let result = JsFuture::from(promise).await.map_err(js_error)?;
        if result.is_undefined() || result.is_null() {
            return Ok(Value::Null);
        }
        let text: String = JSON::stringify(&result).map_err(js_error)?.into();
        serde_json::from_str(&text).map_err(|e| WalletError::Decode(e.to_string()))
    }
}

/// Map a thrown JS value (usually `{ code, message }`) into [`WalletError`].
#[allow(clippy::cast_possible_truncation)]
fn js_error(value: JsValue) -> WalletError {
    let code = Reflect::get(&value, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64());
    let message = Reflect::get(&value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    match code {
        Some(code) => WalletError::from_rpc(code as i64, message),
        None => WalletError::Rpc { code: 0, message },
    }
}
