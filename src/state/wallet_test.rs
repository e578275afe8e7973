use super::*;

fn connected(account: &str) -> WalletState {
    WalletState { account: Some(account.to_owned()), ..WalletState::default() }
}

// =============================================================
// WalletState defaults
// =============================================================

#[test]
fn wallet_state_default_is_disconnected() {
    let state = WalletState::default();
    assert!(state.account.is_none());
    assert!(!state.sending);
    assert!(state.waves.is_empty());
    assert_eq!(state.phase(), Phase::Disconnected);
}

// =============================================================
// phase
// =============================================================

#[test]
fn phase_connected_idle() {
    assert_eq!(connected("0xabc").phase(), Phase::ConnectedIdle);
}

#[test]
fn phase_connected_submitting() {
    let state = WalletState { sending: true, ..connected("0xabc") };
    assert_eq!(state.phase(), Phase::ConnectedSubmitting);
}

#[test]
fn phase_sending_without_account_is_still_disconnected() {
    let state = WalletState { sending: true, ..WalletState::default() };
    assert_eq!(state.phase(), Phase::Disconnected);
}

// =============================================================
// set_account
// =============================================================

#[test]
fn set_account_reports_first_connection() {
    let mut state = WalletState::default();
    assert!(state.set_account("0xabc".to_owned()));
    assert_eq!(state.account.as_deref(), Some("0xabc"));
}

#[test]
fn set_account_replacing_existing_is_not_a_transition() {
    let mut state = connected("0xabc");
    assert!(!state.set_account("0xdef".to_owned()));
    assert_eq!(state.account.as_deref(), Some("0xdef"));
}

// =============================================================
// RwSignal store
// =============================================================

#[test]
fn signal_store_modifies_and_snapshots() {
    let owner = Owner::new();
    owner.with(|| {
        let signal = RwSignal::new(WalletState::default());
        assert_eq!(signal.modify(|s| s.set_account("0xabc".to_owned())), Some(true));
        assert_eq!(signal.snapshot().account.as_deref(), Some("0xabc"));
    });
}
