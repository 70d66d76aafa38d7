//! Protocol modules (request, response, permission, denials).
//!
//! This module hosts the wire-level contracts of the authorization pipeline:
//! - Request: inbound headers plus a raw or already-structured body.
//! - Response: the structured envelope every branch builds, and the
//!   serialized form the transport writes after normalization.
//! - Permission: the ordered access vocabulary and the policy threshold.
//! - Denial: the four terminal outcomes with their fixed LFS bodies.

pub mod denial;
pub mod headers;
pub mod permission;
pub mod request;
pub mod response;

pub use denial::Denial;
pub use headers::Headers;
pub use permission::{AccessPolicy, PermissionLevel, ResolverOutcome};
pub use request::{Credential, IncomingRequest, RequestBody};
pub use response::{ResponseEnvelope, WireResponse, LFS_CONTENT_TYPE};
