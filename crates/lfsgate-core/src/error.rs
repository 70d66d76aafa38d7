//! Shared error type across lfsgate crates.

use thiserror::Error;

/// Stable fault codes for faults that end a request outside the four
/// authorization denials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCode {
    /// Request body could not be decoded into structured data.
    BodyDecode,
    /// The host returned a permission string outside the known vocabulary.
    PermissionDecode,
    /// No handler registered for the requested operation.
    UnknownOperation,
    /// Handler rejected the request payload.
    Unprocessable,
    /// Internal server error.
    Internal,
}

impl FaultCode {
    /// String representation used in logs and metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::BodyDecode => "BODY_DECODE",
            FaultCode::PermissionDecode => "PERMISSION_DECODE",
            FaultCode::UnknownOperation => "UNKNOWN_OPERATION",
            FaultCode::Unprocessable => "UNPROCESSABLE",
            FaultCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status code written to the wire.
    pub fn status(self) -> u16 {
        match self {
            FaultCode::UnknownOperation => 404,
            FaultCode::Unprocessable => 422,
            FaultCode::BodyDecode | FaultCode::PermissionDecode | FaultCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, LfsGateError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum LfsGateError {
    #[error("body decode failed: {0}")]
    BodyDecode(String),
    #[error("unrecognized permission level: {0}")]
    PermissionDecode(String),
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("unprocessable request: {0}")]
    Unprocessable(String),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl LfsGateError {
    /// Map internal error to a stable fault code.
    pub fn fault_code(&self) -> FaultCode {
        match self {
            LfsGateError::BodyDecode(_) => FaultCode::BodyDecode,
            LfsGateError::PermissionDecode(_) => FaultCode::PermissionDecode,
            LfsGateError::UnknownOperation(_) => FaultCode::UnknownOperation,
            LfsGateError::Unprocessable(_) => FaultCode::Unprocessable,
            LfsGateError::Config(_) | LfsGateError::Internal(_) => FaultCode::Internal,
        }
    }

    /// Message safe to hand back to the LFS client.
    ///
    /// Decode and internal failures keep their detail in logs only.
    pub fn client_message(&self) -> String {
        match self {
            LfsGateError::UnknownOperation(op) => format!("Unknown LFS operation: {op}"),
            LfsGateError::Unprocessable(msg) => msg.clone(),
            LfsGateError::BodyDecode(_) => "The request body is not valid JSON.".to_string(),
            LfsGateError::PermissionDecode(_)
            | LfsGateError::Config(_)
            | LfsGateError::Internal(_) => "Internal server error.".to_string(),
        }
    }
}
