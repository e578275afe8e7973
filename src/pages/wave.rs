//! The wave page: connect a wallet, wave, and list every wave so far.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only route. The page builds the browser controller once,
//! detects an existing session on mount, and hands user clicks to the
//! controller on the local task queue. Rendering reads `WalletState` only.

#[cfg(test)]
#[path = "wave_test.rs"]
mod wave_test;

use leptos::prelude::*;

use crate::net::types::Wave;
use crate::state::wallet::{Phase, WalletState};
use crate::util::format::{short_address, wave_button_label, wave_time};

#[cfg(feature = "csr")]
use self::actions::Actions;

/// Wave portal page.
#[component]
pub fn WavePage() -> impl IntoView {
    let state = expect_context::<RwSignal<WalletState>>();

    #[cfg(feature = "csr")]
    let actions = {
        let actions = Actions::new(state);
        actions.spawn(|c| async move {
            c.detect_session().await;
        });
        actions
    };

    let on_wave = move |_| {
        #[cfg(feature = "csr")]
        actions.spawn(|c| async move {
            let message = c.config().wave_message.clone();
            c.submit(&message).await;
        });
    };
    let on_connect = move |_| {
        #[cfg(feature = "csr")]
        actions.spawn(|c| async move { c.connect().await });
    };
    let on_reload = move |_| {
        #[cfg(feature = "csr")]
        actions.spawn(|c| async move { c.refresh().await });
    };

    view! {
        <div class="main-container">
            <div class="data-container">
                <div class="header">"👋 Hey there!"</div>
                <div class="bio">"Connect your Ethereum wallet and wave at me!"</div>
                <Show when=move || state.with(|s| s.account.is_some())>
                    <div class="account">{move || state.with(account_label)}</div>
                </Show>
                <button class="wave-button" on:click=on_wave>
                    {move || wave_button_label(state.with(|s| s.sending))}
                </button>
                <Show when=move || state.with(show_connect)>
                    <button class="wave-button" on:click=on_connect>
                        "Connect Wallet"
                    </button>
                </Show>
                <Show when=move || state.with(show_waves)>
                    <div class="all-waves">
                        <h2 class="all-waves__heading">
                            "All Waves" <button on:click=on_reload>"Reload"</button>
                        </h2>
                        <div class="all-waves__list">
                            <For
                                each=move || state.with(|s| keyed_waves(&s.waves))
                                key=|(key, _)| key.clone()
                                children=|(_, wave)| view! { <WaveRow wave=wave/> }
                            />
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn WaveRow(wave: Wave) -> impl IntoView {
    let time = wave_time(&wave.timestamp);
    view! {
        <div class="wave">
            <div>"Address: " {wave.waver}</div>
            <div>"Message: " {wave.message}</div>
            <div>"Time: " {time}</div>
        </div>
    }
}

pub(crate) fn show_connect(state: &WalletState) -> bool {
    state.phase() == Phase::Disconnected
}

pub(crate) fn show_waves(state: &WalletState) -> bool {
    !state.waves.is_empty()
}

pub(crate) fn account_label(state: &WalletState) -> String {
    state.account.as_deref().map(short_address).unwrap_or_default()
}

/// Row identity for `<For>`: position plus content, so a refreshed list with
/// different waves at the same positions re-renders.
pub(crate) type WaveKey = (usize, i64, String, String);

pub(crate) fn keyed_waves(waves: &[Wave]) -> Vec<(WaveKey, Wave)> {
    waves
        .iter()
        .enumerate()
        .map(|(i, w)| ((i, w.timestamp.timestamp(), w.waver.clone(), w.message.clone()), w.clone()))
        .collect()
}

#[cfg(feature = "csr")]
mod actions {
    use std::future::Future;
    use std::rc::Rc;

    use leptos::prelude::*;

    use crate::config::ClientConfig;
    use crate::controller::WaveController;
    use crate::net::browser::BrowserWallet;
    use crate::state::wallet::WalletState;
    use crate::util::dialogs::BrowserDialogs;

    pub(super) type BrowserController = WaveController<BrowserWallet, RwSignal<WalletState>, BrowserDialogs>;

    /// Copyable handle to the page's controller for event handlers.
    #[derive(Clone, Copy)]
    pub(super) struct Actions {
        controller: StoredValue<Rc<BrowserController>, LocalStorage>,
    }

    impl Actions {
        pub(super) fn new(state: RwSignal<WalletState>) -> Self {
            let wallet = BrowserWallet::detect();
            if wallet.is_none() {
                log::info!("no injected ethereum provider");
            }
            let controller = WaveController::new(wallet, state, BrowserDialogs, ClientConfig::from_env());
            Self { controller: StoredValue::new_local(Rc::new(controller)) }
        }

        /// Run one controller flow on the local task queue.
        pub(super) fn spawn<F, Fut>(self, flow: F)
        where
            F: FnOnce(Rc<BrowserController>) -> Fut,
            Fut: Future<Output = ()> + 'static,
        {
            let Some(controller) = self.controller.try_get_value() else {
                return;
            };
            leptos::task::spawn_local(flow(controller));
        }
    }
}
