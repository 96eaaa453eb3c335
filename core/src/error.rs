//! Error types for the Mailgun client.
//!
//! # Design
//! HTTP failures fall into four kinds: `Generic`, `Client`, `Authentication`
//! and `Server`. `Authentication` is a specialization of `Client`, and
//! `is_client_error` reports true for both, so callers that handle every 4xx
//! also handle 401s. The remaining variants cover failures outside the HTTP
//! exchange: configuration, transport, decoding and record access.

use thiserror::Error;

/// Errors returned by `MailgunClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP outcome that is neither 2xx, 4xx nor 5xx, or a local check
    /// that failed before dispatch (unresolved domain, no recipients).
    #[error("{message}")]
    Generic { status: Option<u16>, message: String },

    /// The API answered with a 4xx status other than 401.
    #[error("{message}")]
    Client { status: u16, message: String },

    /// The API answered with 401.
    #[error("{message}")]
    Authentication { message: String },

    /// The API answered with a 5xx status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Required configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// The transport failed before producing a response.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A successful JSON response body could not be parsed.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// `Record::attr` was called with a key the record does not hold.
    #[error("no such attribute: {0}")]
    UnknownAttribute(String),
}

impl ApiError {
    pub(crate) fn no_domain() -> Self {
        ApiError::Generic {
            status: None,
            message: "No domain provided".to_string(),
        }
    }

    pub(crate) fn no_recipients() -> Self {
        ApiError::Generic {
            status: None,
            message: "SMTP To address may not be blank".to_string(),
        }
    }

    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ApiError::Transport(Box::new(err))
    }

    /// The message carried by the four HTTP kinds.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Generic { message, .. }
            | ApiError::Client { message, .. }
            | ApiError::Authentication { message }
            | ApiError::Server { message, .. } => Some(message),
            _ => None,
        }
    }

    /// The HTTP status that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Generic { status, .. } => *status,
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Authentication { .. } => Some(401),
            _ => None,
        }
    }

    /// True for `Client` and `Authentication`.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::Client { .. } | ApiError::Authentication { .. })
    }

    pub fn is_authentication_error(&self) -> bool {
        matches!(self, ApiError::Authentication { .. })
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Server { .. })
    }
}
