//! Client configuration baked in at build time.
//!
//! The browser has no process environment, so values are captured with
//! `option_env!` when the WASM bundle is compiled. Parsing goes through
//! [`ClientConfig::from_lookup`] so tests can feed arbitrary values.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const CONTRACT_ADDRESS_VAR: &str = "WAVE_PORTAL_CONTRACT_ADDRESS";
pub const RECEIPT_POLL_MS_VAR: &str = "WAVE_PORTAL_RECEIPT_POLL_MS";
pub const WAVE_MESSAGE_VAR: &str = "WAVE_PORTAL_MESSAGE";

pub const DEFAULT_RECEIPT_POLL_MS: u32 = 1000;
pub const DEFAULT_WAVE_MESSAGE: &str = "mock wave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Deployed contract address. Not validated here; a missing or malformed
    /// value fails later when the contract is bound.
    pub contract_address: Option<String>,
    pub receipt_poll_ms: u32,
    pub wave_message: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            contract_address: None,
            receipt_poll_ms: DEFAULT_RECEIPT_POLL_MS,
            wave_message: DEFAULT_WAVE_MESSAGE.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build config from the values captured at compile time.
    ///
    /// Optional:
    /// - `WAVE_PORTAL_CONTRACT_ADDRESS`: deployed contract address
    /// - `WAVE_PORTAL_RECEIPT_POLL_MS`: default 1000
    /// - `WAVE_PORTAL_MESSAGE`: default `mock wave`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match key {
            CONTRACT_ADDRESS_VAR => option_env!("WAVE_PORTAL_CONTRACT_ADDRESS").map(str::to_owned),
            RECEIPT_POLL_MS_VAR => option_env!("WAVE_PORTAL_RECEIPT_POLL_MS").map(str::to_owned),
            WAVE_MESSAGE_VAR => option_env!("WAVE_PORTAL_MESSAGE").map(str::to_owned),
            _ => None,
        })
    }

    /// Build config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let contract_address = lookup(CONTRACT_ADDRESS_VAR)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
        let receipt_poll_ms = lookup(RECEIPT_POLL_MS_VAR)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_RECEIPT_POLL_MS);
        let wave_message = lookup(WAVE_MESSAGE_VAR).unwrap_or_else(|| DEFAULT_WAVE_MESSAGE.to_owned());

        Self { contract_address, receipt_poll_ms, wave_message }
    }
}
