//! Top-level facade crate for lfsgate.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use lfsgate_core::*;
}

pub mod gateway {
    pub use lfsgate_gateway::*;
}
