//! Blocking user-facing dialogs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only one flow surfaces an error to the user: connecting without a wallet
//! installed. The controller goes through [`Dialogs`] so tests can count
//! alerts instead of blocking on `window.alert`.

/// Sink for blocking alerts.
pub trait Dialogs {
    fn alert(&self, message: &str);
}

/// `window.alert` in the browser; logs instead outside it.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn alert(&self, message: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.alert_with_message(message) {
                    log::warn!("alert failed: {e:?}");
                }
                return;
            }
        }
        log::warn!("alert: {message}");
    }
}
