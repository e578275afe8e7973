//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates wallet/contract
//! work to the controller.

pub mod wave;
