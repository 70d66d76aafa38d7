//! Inbound request shape.
//!
//! Deserializes from the serverless event convention
//! (`{headers, body, isBase64Encoded}`) where `body` is either a JSON string
//! or an already-parsed object. HTTP transports build it directly.

use std::fmt;

use bytes::Bytes;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::headers::Headers;

/// Request body as received, before any decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Already a structured mapping; passed through as-is.
    Structured(Map<String, Value>),
    /// Raw bytes: JSON text, or base64 of it when the request says so.
    Raw(Bytes),
}

/// One inbound LFS API request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "EventShape")]
pub struct IncomingRequest {
    headers: Headers,
    body: RequestBody,
    is_body_encoded: bool,
}

impl IncomingRequest {
    pub fn new(headers: Headers, body: RequestBody, is_body_encoded: bool) -> Self {
        Self {
            headers,
            body,
            is_body_encoded,
        }
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn is_body_encoded(&self) -> bool {
        self.is_body_encoded
    }

    /// Split into parts once the headers have been consumed.
    pub fn into_body(self) -> (RequestBody, bool) {
        (self.body, self.is_body_encoded)
    }
}

/// Opaque `authorization` header value, forwarded unexamined to the host.
///
/// `Debug` is redacted so the value never reaches logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Deserialize)]
struct EventShape {
    #[serde(default)]
    headers: Option<Headers>,
    #[serde(default)]
    body: Option<EventBody>,
    #[serde(default, rename = "isBase64Encoded")]
    is_base64_encoded: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventBody {
    Structured(Map<String, Value>),
    Text(String),
}

impl From<EventShape> for IncomingRequest {
    fn from(ev: EventShape) -> Self {
        let body = match ev.body {
            Some(EventBody::Structured(m)) => RequestBody::Structured(m),
            Some(EventBody::Text(s)) => RequestBody::Raw(Bytes::from(s)),
            None => RequestBody::Raw(Bytes::new()),
        };
        IncomingRequest::new(ev.headers.unwrap_or_default(), body, ev.is_base64_encoded)
    }
}
