//! Response decoding and success/failure classification.
//!
//! A [`RawResponse`] goes through three ordered steps: content-type
//! detection, body decoding, then status classification. Decoding always
//! precedes classification, and a JSON parse failure is terminal no matter
//! what the status code says. Every response resolves to exactly one
//! outcome.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{DavenportError, ServerError};
use crate::transport::RawResponse;

/// A decoded response body, chosen by content-type.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// `application/json` or `text/json` bodies, strictly parsed.
    Json(Value),
    /// Bodies whose content-type mentions `xml`. The document text is
    /// passed through untouched for the caller to parse.
    Xml(String),
    /// Everything else, as raw text.
    Text(String),
}

impl Body {
    /// The parsed JSON value, for [`Body::Json`].
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Xml(_) | Self::Text(_) => None,
        }
    }

    /// The raw text, for [`Body::Xml`] and [`Body::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Xml(text) | Self::Text(text) => Some(text),
        }
    }
}

/// A successfully completed request: the decoded body plus the raw
/// response for low-level access.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Decoded response body.
    pub body: Body,
    /// The raw response the body was decoded from.
    pub response: RawResponse,
}

/// The shape a structured CouchDB-style error body decodes into. Absence
/// of both `error` and `reason` means the body is not a structured error.
#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    code: Option<Value>,
}

/// Classifies a raw response into exactly one success or failure.
///
/// Status codes 200, 201, and 202 succeed; the status code is authoritative
/// over body shape, except that a failed JSON parse of a declared-JSON body
/// is terminal even on a success status.
///
/// # Errors
///
/// [`DavenportError::Decode`] when a declared-JSON body fails to parse,
/// [`DavenportError::Server`] when a non-success response carries the
/// server's `error`/`reason` fields, [`DavenportError::Status`] for any
/// other non-success status.
pub fn interpret(response: RawResponse) -> Result<Completion, DavenportError> {
    let body = match decode_body(&response) {
        Ok(body) => body,
        Err(source) => {
            return Err(DavenportError::Decode {
                source,
                response: Box::new(response),
            });
        }
    };

    if matches!(response.status(), 200 | 201 | 202) {
        return Ok(Completion { body, response });
    }

    if let Some(reported) = structured_error(&body) {
        let message = reported
            .reason
            .clone()
            .or_else(|| reported.error.clone())
            .unwrap_or_default();
        return Err(DavenportError::Server(Box::new(ServerError {
            message,
            error: reported.error,
            reason: reported.reason,
            code: reported.code,
            status: response.status(),
            response,
        })));
    }

    Err(DavenportError::Status {
        message: fallback_message(&response),
        status: response.status(),
        response: Box::new(response),
    })
}

/// The media type without parameters: everything before the first `;`,
/// trimmed.
fn media_type(response: &RawResponse) -> Option<&str> {
    response
        .content_type()
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
}

fn decode_body(response: &RawResponse) -> Result<Body, serde_json::Error> {
    match media_type(response) {
        Some("application/json" | "text/json") => {
            // HEAD responses advertise JSON but carry no body; that is a
            // null result, not a parse failure.
            if response.body().trim().is_empty() {
                Ok(Body::Json(Value::Null))
            } else {
                serde_json::from_str(response.body()).map(Body::Json)
            }
        }
        Some(media) if media.contains("xml") => Ok(Body::Xml(response.body().to_owned())),
        _ => Ok(Body::Text(response.body().to_owned())),
    }
}

fn structured_error(body: &Body) -> Option<ServerErrorBody> {
    let Body::Json(value) = body else {
        return None;
    };
    // A shape mismatch (non-object body, or a field of the wrong type)
    // classifies as an opaque failure, not a structured one.
    let reported: ServerErrorBody = serde_json::from_value(value.clone()).ok()?;
    if reported.error.is_none() && reported.reason.is_none() {
        return None;
    }
    Some(reported)
}

fn fallback_message(response: &RawResponse) -> String {
    match response.status_text() {
        Some(text) if !text.is_empty() && text != "error" => text.to_owned(),
        _ => format!("Returned status code: {}", response.status()),
    }
}
