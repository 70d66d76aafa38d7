//! lfsgate core: transport-agnostic wire types, permission model, and the
//! shared error surface.
//!
//! This crate defines the request/response shapes that flow through the
//! authorization pipeline, the ordered permission vocabulary of the
//! source-control host, and the terminal denials the pipeline may produce.
//! It carries no runtime or transport dependencies so the same types can back
//! an HTTP server, a serverless handler, or tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `LfsGateError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{FaultCode, LfsGateError, Result};
