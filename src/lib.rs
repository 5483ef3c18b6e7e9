#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

//! # `davenport`
//!
//! A minimal HTTP request helper for CouchDB-style document APIs: it builds
//! requests, normalizes heterogeneous responses (JSON, XML, plain text) into
//! a single completion contract, and classifies HTTP outcomes uniformly.
//!
//! ## Quick Start
//!
//! ```no_run
//! use davenport::{Body, Client};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new();
//!
//! let completion = client.get("http://localhost:5984/mydb/doc-1").await?;
//! if let Body::Json(doc) = &completion.body {
//!     println!("{doc}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error classification
//!
//! Non-success statuses with a CouchDB-style `error`/`reason` body become
//! [`DavenportError::Server`], carrying the server's own fields verbatim;
//! anything else becomes [`DavenportError::Status`] with a message derived
//! from the status line. See [`interpret::interpret`] for the full rules.
//!
//! ## Transports
//!
//! The client is generic over a [`Transport`] so tests can inject doubles;
//! [`ReqwestTransport`] is the production implementation.

/// HTTP client and method shortcuts
pub mod client;
/// Request descriptors and payload encoding
pub mod encode;
/// Error types
pub mod error;
/// Response decoding and status classification
pub mod interpret;
/// Transport capability and the reqwest implementation
pub mod transport;

pub use crate::client::Client;
pub use crate::encode::{Method, RequestDescriptor, build_request, stringify_query};
pub use crate::error::{DavenportError, ServerError};
pub use crate::interpret::{Body, Completion, interpret};
pub use crate::transport::{RawResponse, ReqwestTransport, Transport, TransportError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Body, Client, Completion, DavenportError, Method, RawResponse, RequestDescriptor,
        Transport,
    };
}
