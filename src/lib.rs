//! restodb-rs
//!
//! Umbrella crate for the demos; re-exports [`restodb_core`].
pub use restodb_core::*;
