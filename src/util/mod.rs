//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and
//! controller logic to improve reuse and testability.

pub mod dialogs;
pub mod format;
