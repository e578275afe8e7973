//! # wave-portal
//!
//! Leptos + WASM front-end for a wave portal contract: connect an injected
//! Ethereum wallet, send a wave, and list every wave recorded on chain.
//!
//! The crate holds the page and app shell, the wallet/contract controller,
//! client state, and the EIP-1193 + ABI plumbing the controller talks through.
//! Browser bindings are gated behind the `csr` feature so everything else
//! builds and tests natively.

pub mod app;
pub mod config;
pub mod controller;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod testing;

/// Browser entry point: install logging and mount the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn mount() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger init failed: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
