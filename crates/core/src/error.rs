//! Unified error types for sift.
//!
//! Errors fall into three groups:
//! - caller misuse, raised locally before any request is sent
//! - transport failures, where no usable HTTP response was obtained
//! - protocol failures, where the engine answered with a non-2xx status

use crate::Payload;

/// Result alias used throughout sift.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for sift requests.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Server URL is unparsable or unusable as a base.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Path segment (index name, document id) cannot be placed in a URL.
    #[error("INVALID_SEGMENT: {0}")]
    InvalidSegment(String),

    /// Payload could not be serialized.
    #[error("ENCODE_FAILED: {0}")]
    Encode(String),

    /// Request timed out.
    #[error("TRANSPORT_TIMEOUT: request timed out")]
    Timeout,

    /// Connection or protocol failure below HTTP status level.
    #[error("TRANSPORT_ERROR: {0}")]
    Network(String),

    /// Successful response whose body is not valid JSON.
    #[error("DECODE_FAILED: {0}")]
    Decode(String),

    /// Non-2xx response. The body is the engine's own, untouched.
    #[error("HTTP_ERROR: status {status}")]
    Status { status: u16, body: Option<Payload> },
}

impl Error {
    /// True for failures where no usable response came back.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Timeout | Error::Network(_) | Error::Decode(_))
    }

    /// True when the engine answered with a non-2xx status.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Status { .. })
    }

    /// HTTP status carried by a protocol failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error body carried by a protocol failure.
    pub fn body(&self) -> Option<&Payload> {
        match self {
            Error::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}
