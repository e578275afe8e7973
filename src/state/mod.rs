//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The page has a single state model; it lives in `wallet` and is provided to
//! components through Leptos context as an `RwSignal`.

pub mod wallet;
