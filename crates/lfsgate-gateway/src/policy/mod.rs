//! Policy layer (minimum repository access).
//!
//! Compares the resolved permission against the configured threshold before
//! any request reaches a storage handler.

pub mod gate;

pub use gate::{decide, enforce, GateDecision};
