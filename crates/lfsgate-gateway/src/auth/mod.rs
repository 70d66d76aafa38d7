//! Caller authentication (credential extraction).
//!
//! The credential is treated as opaque: the raw `authorization` header value
//! is forwarded unchanged to the host. No Basic/Token scheme parsing is done.

pub mod credential;

pub use credential::{extract_credential, AUTHORIZATION};
