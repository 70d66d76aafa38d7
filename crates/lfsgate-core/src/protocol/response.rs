//! Response envelope and its one-shot normalization.
//!
//! Every branch of the pipeline builds a `ResponseEnvelope` whose body, if
//! any, is structured. `normalize` consumes it and yields the `WireResponse`
//! with the body serialized to text. Because `normalize` takes the envelope
//! by value it runs once per request, and a pre-serialized body cannot be
//! built on the envelope side.

use serde::Serialize;
use serde_json::{json, Value};

use super::headers::Headers;

/// Media type of every Git LFS API response.
pub const LFS_CONTENT_TYPE: &str = "application/vnd.git-lfs+json";

/// Structured response produced by the pipeline branches and handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: Headers,
    pub body: Option<Value>,
    pub is_body_encoded: bool,
}

impl ResponseEnvelope {
    /// Envelope without a body.
    pub fn empty(status_code: u16) -> Self {
        Self {
            status_code,
            headers: Headers::new(),
            body: None,
            is_body_encoded: false,
        }
    }

    /// LFS JSON response with the LFS media type set.
    pub fn lfs(status_code: u16, body: Value) -> Self {
        let mut headers = Headers::new();
        headers.insert("Content-Type", LFS_CONTENT_TYPE);
        Self {
            status_code,
            headers,
            body: Some(body),
            is_body_encoded: false,
        }
    }

    /// LFS error object (`message` plus optional `documentation_url`).
    pub fn lfs_error(status_code: u16, message: &str, documentation_url: Option<&str>) -> Self {
        let body = match documentation_url {
            Some(url) => json!({ "message": message, "documentation_url": url }),
            None => json!({ "message": message }),
        };
        Self::lfs(status_code, body)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Serialize the structured body to text. An envelope without a body is
    /// carried over untouched.
    pub fn normalize(self) -> WireResponse {
        WireResponse {
            status_code: self.status_code,
            headers: self.headers,
            body: self.body.map(|b| b.to_string()),
            is_body_encoded: self.is_body_encoded,
        }
    }
}

/// Transport-ready response: body is text or absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireResponse {
    pub status_code: u16,
    pub headers: Headers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "isBase64Encoded")]
    pub is_body_encoded: bool,
}
