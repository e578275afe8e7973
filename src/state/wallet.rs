//! Wallet session, submission flag, and fetched waves.
//!
//! DESIGN
//! ======
//! The three fields together define the observable phase; there is no stored
//! state-machine enum. [`WaveStore`] is the write seam the controller goes
//! through so it can mutate either a Leptos signal or a plain test cell.

#[cfg(test)]
#[path = "wallet_test.rs"]
mod wallet_test;

use leptos::prelude::*;

use crate::net::types::Wave;

/// Observable phase derived from [`WalletState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    ConnectedIdle,
    ConnectedSubmitting,
}

/// Client state for the wave page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletState {
    /// Authorized account, if any.
    pub account: Option<String>,
    /// True while a submitted wave awaits confirmation.
    pub sending: bool,
    /// Last fetched waves, in contract order.
    pub waves: Vec<Wave>,
}

impl WalletState {
    pub fn phase(&self) -> Phase {
        match (&self.account, self.sending) {
            (None, _) => Phase::Disconnected,
            (Some(_), false) => Phase::ConnectedIdle,
            (Some(_), true) => Phase::ConnectedSubmitting,
        }
    }

    /// Set the session account. Returns `true` when this moved the session
    /// from absent to present.
    pub fn set_account(&mut self, account: String) -> bool {
        let was_absent = self.account.is_none();
        self.account = Some(account);
        was_absent
    }
}

/// Shared handle to [`WalletState`].
pub trait WaveStore {
    /// Snapshot the current state without subscribing.
    fn snapshot(&self) -> WalletState;

    /// Mutate the state in place. `None` when the backing store is gone.
    fn modify<R>(&self, f: impl FnOnce(&mut WalletState) -> R) -> Option<R>;
}

impl WaveStore for RwSignal<WalletState> {
    fn snapshot(&self) -> WalletState {
        self.try_get_untracked().unwrap_or_default()
    }

    fn modify<R>(&self, f: impl FnOnce(&mut WalletState) -> R) -> Option<R> {
        self.try_update(f)
    }
}
