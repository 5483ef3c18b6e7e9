//! Request descriptors and the method-dependent payload encoding rules.
//!
//! GET and HEAD carry structured data as stringified query parameters;
//! every other method carries it as a pre-serialized JSON body.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DavenportError;

/// Content type attached to JSON request bodies.
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP verbs supported by the helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET — payload becomes query parameters.
    Get,
    /// POST — payload becomes a JSON body.
    Post,
    /// PUT — payload becomes a JSON body.
    Put,
    /// HEAD — payload becomes query parameters.
    Head,
    /// DELETE — payload becomes a JSON body.
    Delete,
}

impl Method {
    /// The uppercase wire token for this verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Head => "HEAD",
            Self::Delete => "DELETE",
        }
    }

    /// GET and HEAD requests have no body; their data rides in the query
    /// string.
    const fn carries_query(self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Head => Self::HEAD,
            Method::Delete => Self::DELETE,
        }
    }
}

/// A transport-agnostic request, built fresh per call and consumed by the
/// [`Transport`](crate::transport::Transport) that executes it.
///
/// A present `body` is always pre-serialized JSON text; the transport must
/// send it verbatim and never re-encode it.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP verb.
    pub method: Method,
    /// Absolute request URL.
    pub url: String,
    /// Query parameters, already stringified.
    pub query: Vec<(String, String)>,
    /// Pre-serialized JSON body, if any.
    pub body: Option<String>,
    /// Content type to send alongside `body`.
    pub content_type: Option<&'static str>,
}

impl RequestDescriptor {
    /// Creates a descriptor with no payload.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            body: None,
            content_type: None,
        }
    }
}

/// Encodes query parameters for CouchDB-style endpoints.
///
/// Returns a fresh map with the same keys where every non-string value
/// (numbers, booleans, arrays, objects, null) is replaced by its compact
/// JSON text, while plain strings pass through unchanged. View keys and
/// other structured parameters stay legible to a server expecting
/// JSON-encoded query values, and strings are never double-quoted.
///
/// ```
/// use serde_json::{Map, Value, json};
///
/// let mut query = Map::new();
/// query.insert("startkey".into(), json!(["a", 1]));
/// query.insert("limit".into(), json!(10));
/// query.insert("stale".into(), json!("ok"));
///
/// let q = davenport::stringify_query(&query);
/// assert_eq!(q["startkey"], Value::String("[\"a\",1]".into()));
/// assert_eq!(q["limit"], Value::String("10".into()));
/// assert_eq!(q["stale"], Value::String("ok".into()));
/// ```
#[must_use]
pub fn stringify_query(query: &Map<String, Value>) -> Map<String, Value> {
    query
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(stringify_value(value))))
        .collect()
}

fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builds a [`RequestDescriptor`] from a verb, URL, and optional payload.
///
/// # Errors
///
/// Returns [`DavenportError::Encode`] when the payload cannot be serialized
/// to JSON, or when GET/HEAD data does not serialize to a JSON object. No
/// request reaches the transport on either path.
pub fn build_request<D: Serialize + ?Sized>(
    method: Method,
    url: &str,
    data: Option<&D>,
) -> Result<RequestDescriptor, DavenportError> {
    let mut request = RequestDescriptor::new(method, url);
    let Some(data) = data else {
        return Ok(request);
    };

    if method.carries_query() {
        let value = serde_json::to_value(data).map_err(|e| DavenportError::Encode(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(DavenportError::Encode(
                "query data must serialize to a JSON object".into(),
            ));
        };
        request.query = map
            .iter()
            .map(|(key, value)| (key.clone(), stringify_value(value)))
            .collect();
    } else {
        let body = serde_json::to_string(data).map_err(|e| DavenportError::Encode(e.to_string()))?;
        request.body = Some(body);
        request.content_type = Some(APPLICATION_JSON);
    }

    Ok(request)
}
