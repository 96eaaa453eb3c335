//! Response classification and decoding.
//!
//! `decode` turns a raw `HttpResponse` into either a `Payload` or an
//! `ApiError`. The error kind depends only on the status code. The message
//! comes from the JSON error envelope when the body has one.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{is_json_media_type, HttpResponse};
use crate::record::Record;

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Body of a response whose content type is `application/json`.
    Json(Value),
    /// Any other body that is valid UTF-8, verbatim.
    Text(String),
    /// Any other body that is not valid UTF-8, e.g. a MIME message with
    /// 8-bit headers.
    Binary(Vec<u8>),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Raw bytes of a non-JSON body, whether or not it is UTF-8.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Text(text) => Some(text.as_bytes()),
            Payload::Binary(bytes) => Some(bytes),
            Payload::Json(_) => None,
        }
    }

    /// The payload as a `Record` when it is a JSON object.
    pub fn into_record(self) -> Option<Record> {
        match self {
            Payload::Json(value) => Record::try_from(value).ok(),
            _ => None,
        }
    }
}

/// Decode a response, classifying non-2xx statuses into `ApiError`.
///
/// # Errors
/// Returns the error kind selected by `classify` for non-2xx statuses, and
/// `ApiError::Decode` when a 2xx JSON body does not parse.
pub fn decode(response: HttpResponse) -> Result<Payload, ApiError> {
    if !response.is_success() {
        let message = error_message(&response);
        return Err(classify(response.status, message));
    }

    if response.content_type().is_some_and(is_json_media_type) {
        let value = serde_json::from_slice(&response.body)?;
        return Ok(Payload::Json(value));
    }

    match String::from_utf8(response.body) {
        Ok(text) => Ok(Payload::Text(text)),
        Err(err) => Ok(Payload::Binary(err.into_bytes())),
    }
}

/// Map a non-2xx status to its error kind.
pub fn classify(status: u16, message: String) -> ApiError {
    match status {
        401 => ApiError::Authentication { message },
        400..=499 => ApiError::Client { status, message },
        500..=599 => ApiError::Server { status, message },
        _ => ApiError::Generic {
            status: Some(status),
            message,
        },
    }
}

/// `message` from a JSON error envelope, or the generic fallback. A body that
/// does not parse falls back rather than raising its own error.
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_slice::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {} response from Mailgun API", response.status))
}
