//! Contract-call collaborator for the wave portal.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`WavePortal`] is the seam the controller depends on. [`RpcWavePortal`]
//! implements it on top of any [`Eip1193`] wallet: reads go through
//! `eth_call`, the write goes through `eth_sendTransaction`, and confirmation
//! polls `eth_getTransactionReceipt`.
//!
//! ERROR HANDLING
//! ==============
//! Wallet failures pass through as [`ContractError::Wallet`]. ABI and receipt
//! shape problems become [`ContractError::Abi`]. A mined-but-failed
//! transaction is [`ContractError::Reverted`].

#![allow(async_fn_in_trait)]

#[cfg(test)]
#[path = "contract_test.rs"]
mod contract_test;

use alloy_primitives::{Address, hex};
use alloy_sol_types::SolCall;
use serde::Deserialize;
use serde_json::{Value, json};

use super::abi;
use super::types::RawWave;
use super::wallet::{self, Eip1193, WalletError};

/// Errors produced by contract calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    /// No contract address was configured.
    #[error("contract address not configured")]
    MissingAddress,

    /// The configured contract address is not a 20-byte hex address.
    #[error("invalid contract address: {0}")]
    InvalidAddress(String),

    /// The wallet has no authorized account to sign with.
    #[error("wallet has no authorized account to sign with")]
    NoSigner,

    /// The wallet request itself failed.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// Call data or return data could not be encoded/decoded.
    #[error("abi error: {0}")]
    Abi(String),

    /// The transaction was mined but its receipt reports failure.
    #[error("transaction {hash} reverted")]
    Reverted { hash: String },

    /// A uint256 value did not fit the client-side integer type.
    #[error("value out of range in {0}")]
    Overflow(&'static str),
}

/// How a contract binding is allowed to talk to the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Read-only calls.
    Provider,
    /// Reads plus transactions signed by the wallet's first account.
    Signer,
}

/// A submitted transaction that has not been confirmed yet.
pub trait PendingWave {
    /// Transaction hash as reported by the wallet.
    fn hash(&self) -> &str;

    /// Resolve once the transaction is mined.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Reverted`] if the receipt reports failure, or
    /// another [`ContractError`] if polling fails.
    async fn wait(self) -> Result<(), ContractError>;
}

/// Methods of the wave portal contract used by the client.
pub trait WavePortal {
    type Pending: PendingWave;

    /// Read `getTotalWaves()`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] if the call or decode fails.
    async fn total_waves(&self) -> Result<u64, ContractError>;

    /// Send `wave(message)` and return the pending transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] if the binding has no signer or the wallet
    /// refuses the transaction.
    async fn wave(&self, message: &str) -> Result<Self::Pending, ContractError>;

    /// Read `getAllWaves()` in contract order.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] if the call or decode fails.
    async fn all_waves(&self) -> Result<Vec<RawWave>, ContractError>;
}

/// Wave portal binding that speaks JSON-RPC through an EIP-1193 wallet.
#[derive(Clone, Debug)]
pub struct RpcWavePortal<W> {
    wallet: W,
    address: Address,
    signer: Option<String>,
    poll_ms: u32,
}

impl<W: Eip1193 + Clone> RpcWavePortal<W> {
    /// Bind the contract at `address`, resolving a signer when `access`
    /// asks for one.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::MissingAddress`] or
    /// [`ContractError::InvalidAddress`] for a bad address, and
    /// [`ContractError::NoSigner`] when a signer is needed but the wallet has
    /// no authorized account.
    pub async fn connect(wallet: W, address: Option<&str>, access: Access, poll_ms: u32) -> Result<Self, ContractError> {
        let address = parse_address(address)?;
        let signer = match access {
            Access::Provider => None,
            Access::Signer => Some(signer_account(&wallet).await?),
        };
        Ok(Self { wallet, address, signer, poll_ms })
    }

    /// Account transactions are sent from, if this binding can sign.
    #[cfg(test)]
    pub(crate) fn signer(&self) -> Option<&str> {
        self.signer.as_deref()
    }

    async fn call<C: SolCall>(&self, call: &C) -> Result<C::Return, ContractError> {
        let mut tx = json!({
            "to": self.address.to_checksum(None),
            "data": hex::encode_prefixed(call.abi_encode()),
        });
        if let Some(from) = &self.signer {
            tx["from"] = Value::String(from.clone());
        }
        let value = self.wallet.request("eth_call", json!([tx, "latest"])).await?;
        let bytes = decode_hex_value(&value)?;
        C::abi_decode_returns(&bytes, true).map_err(|e| ContractError::Abi(e.to_string()))
    }
}

impl<W: Eip1193 + Clone> WavePortal for RpcWavePortal<W> {
    type Pending = RpcPendingWave<W>;

    async fn total_waves(&self) -> Result<u64, ContractError> {
        let ret = self.call(&abi::getTotalWavesCall {}).await?;
        u64::try_from(ret._0).map_err(|_| ContractError::Overflow("getTotalWaves"))
    }

    async fn wave(&self, message: &str) -> Result<Self::Pending, ContractError> {
        let from = self.signer.clone().ok_or(ContractError::NoSigner)?;
        let data = abi::waveCall { message: message.to_owned() }.abi_encode();
        let tx = json!([{
            "from": from,
            "to": self.address.to_checksum(None),
            "data": hex::encode_prefixed(data),
        }]);
        let value = self.wallet.request("eth_sendTransaction", tx).await?;
        let hash = value
            .as_str()
            .ok_or_else(|| ContractError::Abi(format!("eth_sendTransaction returned {value}")))?
            .to_owned();
        Ok(RpcPendingWave { wallet: self.wallet.clone(), hash, poll_ms: self.poll_ms })
    }

    async fn all_waves(&self) -> Result<Vec<RawWave>, ContractError> {
        let ret = self.call(&abi::getAllWavesCall {}).await?;
        Ok(ret._0.into_iter().map(RawWave::from).collect())
    }
}

/// Pending `wave` transaction backed by receipt polling.
#[derive(Clone, Debug)]
pub struct RpcPendingWave<W> {
    wallet: W,
    hash: String,
    poll_ms: u32,
}

impl<W: Eip1193> PendingWave for RpcPendingWave<W> {
    fn hash(&self) -> &str {
        &self.hash
    }

    async fn wait(self) -> Result<(), ContractError> {
        loop {
            let value = self
                .wallet
                .request("eth_getTransactionReceipt", json!([self.hash]))
                .await?;
            if !value.is_null() {
                let receipt: TransactionReceipt =
                    serde_json::from_value(value).map_err(|e| ContractError::Abi(e.to_string()))?;
                return if receipt.succeeded()? { Ok(()) } else { Err(ContractError::Reverted { hash: self.hash }) };
            }
            pause(self.poll_ms).await;
        }
    }
}

#[derive(Debug, Deserialize)]
struct TransactionReceipt {
    /// `0x1` on success, `0x0` on revert. Absent on pre-Byzantium chains.
    #[serde(default)]
    status: Option<String>,
}

impl TransactionReceipt {
    fn succeeded(&self) -> Result<bool, ContractError> {
        match &self.status {
            None => Ok(true),
            Some(status) => {
                let digits = status.trim_start_matches("0x");
                u64::from_str_radix(digits, 16)
                    .map(|code| code != 0)
                    .map_err(|_| ContractError::Abi(format!("bad receipt status {status}")))
            }
        }
    }
}

/// Timestamps wider than `u64` saturate so one bad record cannot hide the rest.
impl From<abi::WaveRecord> for RawWave {
    fn from(record: abi::WaveRecord) -> Self {
        let timestamp = u64::try_from(record.timestamp).unwrap_or(u64::MAX);
        Self { waver: record.waver.to_checksum(None), message: record.message, timestamp }
    }
}

fn parse_address(raw: Option<&str>) -> Result<Address, ContractError> {
    let raw = raw.ok_or(ContractError::MissingAddress)?;
    raw.parse::<Address>()
        .map_err(|_| ContractError::InvalidAddress(raw.to_owned()))
}

async fn signer_account<W: Eip1193>(wallet: &W) -> Result<String, ContractError> {
    wallet::accounts(wallet)
        .await?
        .into_iter()
        .next()
        .ok_or(ContractError::NoSigner)
}

fn decode_hex_value(value: &Value) -> Result<Vec<u8>, ContractError> {
    let raw = value
        .as_str()
        .ok_or_else(|| ContractError::Abi(format!("expected hex string, got {value}")))?;
    hex::decode(raw).map_err(|e| ContractError::Abi(e.to_string()))
}

/// Wait between receipt polls. Immediate outside the browser.
#[cfg_attr(not(feature = "csr"), allow(unused_variables, clippy::unused_async))]
async fn pause(millis: u32) {
    #[cfg(feature = "csr")]
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

