//! Wallet and contract plumbing.
//!
//! SYSTEM CONTEXT
//! ==============
//! `wallet` defines the EIP-1193 seam, `browser` binds it to `window.ethereum`,
//! `abi` + `contract` encode calls against the wave portal, and `types` holds
//! the decoded records.

pub mod abi;
#[cfg(feature = "csr")]
pub mod browser;
pub mod contract;
pub mod types;
pub mod wallet;
