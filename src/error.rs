//! Error types for request encoding, transport, and response classification.

use serde_json::Value;
use thiserror::Error;

use crate::transport::{RawResponse, TransportError};

/// Every way a request can fail.
///
/// Variants that arise after the transport produced a response carry the
/// [`RawResponse`] for low-level access; [`DavenportError::response`]
/// retrieves it uniformly.
#[derive(Debug, Error)]
pub enum DavenportError {
    /// The payload could not be serialized to JSON. No request was issued.
    #[error("request encoding failed: {0}")]
    Encode(String),

    /// The transport collaborator failed before producing a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A body declared as JSON failed strict parsing. Terminal regardless
    /// of HTTP status.
    #[error("invalid JSON in response body: {source}")]
    Decode {
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
        /// The response whose body failed to parse.
        response: Box<RawResponse>,
    },

    /// A non-success status whose body carried the server's own
    /// `error`/`reason` fields.
    #[error("{0}")]
    Server(Box<ServerError>),

    /// A non-success status with no structured error body.
    #[error("{message}")]
    Status {
        /// Status-line text, or a `Returned status code: N` fallback.
        message: String,
        /// Numeric HTTP status code.
        status: u16,
        /// The classified response.
        response: Box<RawResponse>,
    },
}

impl DavenportError {
    /// The HTTP status this failure was classified from, when one exists.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Encode(_) | Self::Transport(_) => None,
            Self::Decode { response, .. } => Some(response.status()),
            Self::Server(server) => Some(server.status),
            Self::Status { status, .. } => Some(*status),
        }
    }

    /// The raw response, for failures that happened after the transport
    /// completed.
    #[must_use]
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::Encode(_) | Self::Transport(_) => None,
            Self::Decode { response, .. } | Self::Status { response, .. } => Some(response),
            Self::Server(server) => Some(&server.response),
        }
    }
}

/// A server-reported failure, normalized from a CouchDB-style error body.
///
/// `message` prefers the body's `reason` over its `error`; the raw fields
/// come through verbatim for programmatic branching.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ServerError {
    /// Human-readable message.
    pub message: String,
    /// The body's raw `error` field.
    pub error: Option<String>,
    /// The body's raw `reason` field.
    pub reason: Option<String>,
    /// The body's raw `code` field; servers send strings or numbers.
    pub code: Option<Value>,
    /// Numeric HTTP status code.
    pub status: u16,
    /// The classified response.
    pub response: RawResponse,
}
