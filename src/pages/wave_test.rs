use super::*;
use crate::net::types::epoch_seconds;

fn wave(waver: &str, message: &str, secs: u64) -> Wave {
    Wave { waver: waver.to_owned(), message: message.to_owned(), timestamp: epoch_seconds(secs) }
}

#[test]
fn connect_button_only_without_account() {
    let mut state = WalletState::default();
    assert!(show_connect(&state));
    state.account = Some("0xabc".to_owned());
    assert!(!show_connect(&state));
}

#[test]
fn connect_button_hidden_while_submitting() {
    let state = WalletState { account: Some("0xabc".to_owned()), sending: true, ..WalletState::default() };
    assert!(!show_connect(&state));
}

#[test]
fn wave_list_hidden_when_empty() {
    let mut state = WalletState::default();
    assert!(!show_waves(&state));
    state.waves.push(wave("0x1", "hi", 1000));
    assert!(show_waves(&state));
}

#[test]
fn account_label_abbreviates_session() {
    let state = WalletState {
        account: Some("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_owned()),
        ..WalletState::default()
    };
    assert_eq!(account_label(&state), "0xf39F...2266");
    assert_eq!(account_label(&WalletState::default()), "");
}

#[test]
fn keyed_waves_distinguishes_identical_rows_by_position() {
    let same = wave("0x1", "hi", 1000);
    let keyed = keyed_waves(&[same.clone(), same]);
    assert_eq!(keyed.len(), 2);
    assert_ne!(keyed[0].0, keyed[1].0);
}

#[test]
fn keyed_waves_changes_key_when_content_changes() {
    let before = keyed_waves(&[wave("0x1", "hi", 1000)]);
    let after = keyed_waves(&[wave("0x1", "bye", 1000)]);
    assert_ne!(before[0].0, after[0].0);
    assert_eq!(after[0].1.message, "bye");
}
