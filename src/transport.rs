//! The transport capability boundary and its production implementation.
//!
//! The helper never talks to the network itself. It hands a
//! [`RequestDescriptor`] to an injected [`Transport`] and gets back a
//! [`RawResponse`]; everything else (TLS, redirects, timeouts, cancellation)
//! belongs to the transport. Tests substitute their own implementations.

use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use thiserror::Error;

use crate::encode::RequestDescriptor;

/// A failure inside the transport collaborator, before any response existed.
#[derive(Debug, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(#[source] Box<dyn StdError + Send + Sync>);

impl TransportError {
    /// Wraps an arbitrary transport-level failure.
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(source: reqwest::Error) -> Self {
        Self(Box::new(source))
    }
}

/// The raw outcome of an executed request, as reported by the transport.
///
/// Header names are normalized to lowercase at construction so lookups are
/// case-insensitive. The interpreter reads this value but never mutates it.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    status_text: Option<String>,
    headers: Vec<(String, String)>,
    body: String,
}

impl RawResponse {
    /// Assembles a response from its transport-reported parts.
    pub fn new(
        status: u16,
        status_text: Option<String>,
        headers: impl IntoIterator<Item = (String, String)>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            status_text,
            headers: headers
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value))
                .collect(),
            body: body.into(),
        }
    }

    /// Numeric HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Human-readable status line text, when the transport had one.
    #[must_use]
    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    /// Case-insensitive header lookup. Returns the first matching value.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The `Content-Type` header, parameters included.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// The response body as text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// The HTTP execution capability the helper calls into.
///
/// Implementations own connection handling, TLS, redirects, timeouts, and
/// cancellation; the helper only builds descriptors and interprets the
/// responses that come back.
pub trait Transport: Send + Sync {
    /// Executes one request and reports the raw response.
    fn execute(
        &self,
        request: RequestDescriptor,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// Production [`Transport`] backed by a pooled [`reqwest::Client`].
///
/// Sends an advisory `Accept: application/json` header on every request.
/// The hint nudges CouchDB-style servers toward JSON but carries no weight
/// in interpretation: the interpreter's content-type sniffing decides how a
/// body is decoded.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with default connect and request timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the reqwest client cannot be built.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(5))
                .timeout(Duration::from_secs(60))
                .build()
                .expect("reqwest client"),
        }
    }

    /// Wraps a caller-configured [`reqwest::Client`].
    ///
    /// Useful for custom timeouts, proxies, or other HTTP configuration.
    #[must_use]
    pub const fn with_http_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.method.into(), request.url.as_str())
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await?;

        Ok(RawResponse::new(
            status.as_u16(),
            status.canonical_reason().map(str::to_owned),
            headers,
            body,
        ))
    }
}
