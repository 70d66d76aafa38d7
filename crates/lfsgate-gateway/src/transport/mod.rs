//! Transport layer (HTTP).
//!
//! Converts axum requests into `IncomingRequest`s and `WireResponse`s back
//! into HTTP responses. No authorization logic lives here.

pub mod http;
