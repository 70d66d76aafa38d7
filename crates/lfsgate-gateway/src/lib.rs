//! lfsgate gateway library entry.
//!
//! Wires credential extraction, permission resolution, the access gate, the
//! storage dispatcher and the HTTP transport into one authorization gateway
//! for a Git LFS backend. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod ops;
pub mod pipeline;
pub mod policy;
pub mod resolver;
pub mod router;
pub mod services;
pub mod transport;
