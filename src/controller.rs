//! Wallet/contract controller behind the wave page.
//!
//! The controller owns no UI. It drives the four user-visible flows (detect,
//! connect, submit, refresh) against injected collaborators and writes the
//! results into a [`WaveStore`].
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is fatal. A missing wallet is logged, except on `connect`
//! where the user gets a blocking alert. Every other collaborator failure is
//! logged and swallowed, leaving the last rendered state in place.
//!
//! CONCURRENCY
//! ===========
//! Runs on the browser event loop. Overlapping `submit` calls are ignored
//! while one is in flight; the `sending` flag is released on every exit path
//! once it has been raised.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::Cell;

use crate::config::ClientConfig;
use crate::net::contract::{Access, ContractError, PendingWave, RpcWavePortal, WavePortal};
use crate::net::types::Wave;
use crate::net::wallet::{self, Eip1193, WalletError};
use crate::state::wallet::WaveStore;
use crate::util::dialogs::Dialogs;

pub const MISSING_WALLET_ALERT: &str = "Get MetaMask!";

pub struct WaveController<W, S, D> {
    wallet: Option<W>,
    store: S,
    dialogs: D,
    config: ClientConfig,
    submitting: Cell<bool>,
}

impl<W, S, D> WaveController<W, S, D>
where
    W: Eip1193 + Clone,
    S: WaveStore,
    D: Dialogs,
{
    /// `wallet` is `None` when no provider was injected into the page.
    pub fn new(wallet: Option<W>, store: S, dialogs: D, config: ClientConfig) -> Self {
        Self { wallet, store, dialogs, config, submitting: Cell::new(false) }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Look for an account the wallet already authorized. Called once at
    /// startup; never prompts the user.
    pub async fn detect_session(&self) -> Option<String> {
        let Some(wallet) = &self.wallet else {
            log::info!("no wallet provider found; install a wallet extension to connect");
            return None;
        };

        let accounts = match wallet::accounts(wallet).await {
            Ok(accounts) => accounts,
            Err(e) => {
                log::warn!("eth_accounts failed: {e}");
                return None;
            }
        };
        let Some(account) = accounts.into_iter().next() else {
            log::info!("no authorized account found");
            return None;
        };

        log::info!("found an authorized account: {account}");
        self.adopt_account(account.clone()).await;
        Some(account)
    }

    /// Ask the wallet for account access, prompting the user if needed.
    pub async fn connect(&self) {
        let Some(wallet) = &self.wallet else {
            self.dialogs.alert(MISSING_WALLET_ALERT);
            return;
        };

        match wallet::request_accounts(wallet).await {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(account) => {
                    log::info!("connected {account}");
                    self.adopt_account(account).await;
                }
                None => log::warn!("wallet granted no accounts"),
            },
            Err(WalletError::Rejected) => log::info!("user declined the connection request"),
            Err(e) => log::warn!("eth_requestAccounts failed: {e}"),
        }
    }

    /// Send one `wave(message)` transaction and wait for it to be mined.
    pub async fn submit(&self, message: &str) {
        let Some(wallet) = &self.wallet else {
            log::warn!("no wallet provider found; wave skipped");
            return;
        };
        if self.submitting.get() || self.store.snapshot().sending {
            log::info!("a wave is already in flight; ignoring");
            return;
        }

        self.submitting.set(true);
        let result = self.send_wave(wallet, message).await;
        self.submitting.set(false);

        if let Err(e) = result {
            log::warn!("wave failed: {e}");
        }
    }

    /// Reload every wave from the contract, replacing the current list.
    pub async fn refresh(&self) {
        let Some(wallet) = &self.wallet else {
            log::warn!("no wallet provider found; refresh skipped");
            return;
        };

        let loaded = match self.bind(wallet, Access::Provider).await {
            Ok(portal) => load_waves(&portal, &self.store).await,
            Err(e) => Err(e),
        };
        match loaded {
            Ok(count) => log::debug!("loaded {count} waves"),
            Err(e) => log::warn!("refresh failed: {e}"),
        }
    }

    async fn send_wave(&self, wallet: &W, message: &str) -> Result<(), ContractError> {
        let portal = self.bind(wallet, Access::Signer).await?;
        wave_and_confirm(&portal, &self.store, message).await
    }

    async fn bind(&self, wallet: &W, access: Access) -> Result<RpcWavePortal<W>, ContractError> {
        RpcWavePortal::connect(
            wallet.clone(),
            self.config.contract_address.as_deref(),
            access,
            self.config.receipt_poll_ms,
        )
        .await
    }

    /// Record `account` as the session; the first time a session appears the
    /// wave list is loaded.
    async fn adopt_account(&self, account: String) {
        let became_connected = self.store.modify(|s| s.set_account(account)).unwrap_or(false);
        if became_connected {
            self.refresh().await;
        }
    }
}

/// Read the count, send the wave, hold `sending` across confirmation, then
/// read the count again. Counts are logged only.
///
/// # Errors
///
/// Returns the first [`ContractError`] raised by the portal. `sending` is
/// only raised once the wallet has returned a transaction handle, and is
/// always lowered again before this returns.
pub async fn wave_and_confirm<P, S>(portal: &P, store: &S, message: &str) -> Result<(), ContractError>
where
    P: WavePortal,
    S: WaveStore,
{
    let count = portal.total_waves().await?;
    log::info!("retrieved total wave count: {count}");

    let pending = portal.wave(message).await?;
    let hash = pending.hash().to_owned();
    log::info!("mining {hash}");

    let sending = SendingFlag::raise(store);
    let confirmed = pending.wait().await;
    drop(sending);
    confirmed?;
    log::info!("mined {hash}");

    let count = portal.total_waves().await?;
    log::info!("retrieved total wave count: {count}");
    Ok(())
}

/// Fetch all waves and replace the stored list. Returns how many were loaded.
///
/// # Errors
///
/// Returns [`ContractError`] if the read fails; the stored list is untouched.
pub async fn load_waves<P, S>(portal: &P, store: &S) -> Result<usize, ContractError>
where
    P: WavePortal,
    S: WaveStore,
{
    let waves: Vec<Wave> = portal.all_waves().await?.into_iter().map(Wave::from).collect();
    let count = waves.len();
    store.modify(|s| s.waves = waves);
    Ok(count)
}

/// Holds `WalletState::sending` high until dropped.
struct SendingFlag<'a, S: WaveStore> {
    store: &'a S,
}

impl<'a, S: WaveStore> SendingFlag<'a, S> {
    fn raise(store: &'a S) -> Self {
        store.modify(|s| s.sending = true);
        Self { store }
    }
}

impl<S: WaveStore> Drop for SendingFlag<'_, S> {
    fn drop(&mut self) {
        self.store.modify(|s| s.sending = false);
    }
}
