//! EIP-1193 wallet collaborator.
//!
//! SYSTEM CONTEXT
//! ==============
//! The wallet is an externally owned capability (normally `window.ethereum`).
//! Everything above this module talks to it through [`Eip1193`], so the
//! controller and contract layer can run against an in-memory double.
//!
//! ERROR HANDLING
//! ==============
//! Provider failures are folded into [`WalletError`]; user rejection (code
//! 4001) gets its own variant so callers can log it distinctly.

#![allow(async_fn_in_trait)]

#[cfg(test)]
#[path = "wallet_test.rs"]
mod wallet_test;

use serde_json::Value;

/// EIP-1193 code for "user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors produced by wallet requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    /// The user declined the wallet prompt.
    #[error("request rejected by user")]
    Rejected,

    /// The provider returned a JSON-RPC error.
    #[error("wallet rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The injected object does not expose a usable `request` function.
    #[error("wallet provider does not support request()")]
    Unsupported,

    /// The provider answered with a payload of the wrong shape.
    #[error("wallet response decode failed: {0}")]
    Decode(String),
}

impl WalletError {
    /// Map an EIP-1193 `{ code, message }` error into a typed variant.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        if code == USER_REJECTED_CODE {
            Self::Rejected
        } else {
            Self::Rpc { code, message: message.into() }
        }
    }
}

/// An EIP-1193 provider: one `request({ method, params })` entry point.
pub trait Eip1193 {
    /// Send a single JSON-RPC request through the wallet.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError`] when the provider rejects the call or the user
    /// declines a prompt.
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError>;
}

/// Accounts the wallet has already authorized for this origin (`eth_accounts`).
///
/// # Errors
///
/// Returns [`WalletError`] if the request fails or the payload is not a list
/// of strings.
pub async fn accounts<W: Eip1193>(wallet: &W) -> Result<Vec<String>, WalletError> {
    let value = wallet.request("eth_accounts", Value::Array(Vec::new())).await?;
    parse_accounts(value)
}

/// Ask the wallet for account access (`eth_requestAccounts`), possibly
/// prompting the user.
///
/// # Errors
///
/// Returns [`WalletError::Rejected`] if the user declines, or another
/// [`WalletError`] if the request fails.
pub async fn request_accounts<W: Eip1193>(wallet: &W) -> Result<Vec<String>, WalletError> {
    let value = wallet.request("eth_requestAccounts", Value::Array(Vec::new())).await?;
    parse_accounts(value)
}

fn parse_accounts(value: Value) -> Result<Vec<String>, WalletError> {
    serde_json::from_value(value).map_err(|e| WalletError::Decode(e.to_string()))
}

impl<W: Eip1193 + ?Sized> Eip1193 for std::rc::Rc<W> {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        (**self).request(method, params).await
    }
}
