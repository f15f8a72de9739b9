//! Public facade crate for `toolscout`.
//!
//! This crate intentionally contains no IO or provider-specific logic.
//! It re-exports the backend-agnostic types/traits from `toolscout-core`.

pub use toolscout_core::*;
