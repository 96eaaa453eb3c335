//! The network seam between request building and response decoding.
//!
//! # Design
//! `Transport` executes one `HttpRequest` and returns the raw
//! `HttpResponse`. Status codes are never treated as failures here; only
//! network-level problems are errors, reported as `ApiError::Transport`.
//! `UreqTransport` is the blocking default. Tests substitute their own
//! implementation to observe requests without a network.

use std::time::Duration;

use ureq::http::Response;
use ureq::{Agent, Body, RequestBuilder};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Upper bound on a response body. Stored MIME messages reach 25 MB, well
/// past ureq's 10 MiB default.
pub const MAX_RESPONSE_BODY: u64 = 64 * 1024 * 1024;

/// Executes requests against the API host.
pub trait Transport {
    /// Perform one round trip.
    ///
    /// # Errors
    /// Returns `ApiError::Transport` when no response could be obtained.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    base_url: String,
}

impl UreqTransport {
    /// `base_url` is the scheme and host, e.g. `https://api.mailgun.net`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        // Keep 4xx/5xx as data so the decoder can classify them.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);

        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(&url), &request.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&url), &request.headers).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(&url), &request.headers), &request.body),
            HttpMethod::Put => send(with_headers(self.agent.put(&url), &request.headers), &request.body),
            HttpMethod::Patch => send(with_headers(self.agent.patch(&url), &request.headers), &request.body),
        };

        into_response(result.map_err(ApiError::transport)?)
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: RequestBuilder<ureq::typestate::WithBody>,
    body: &Option<Vec<u8>>,
) -> Result<Response<Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_slice()),
        None => builder.send_empty(),
    }
}

fn into_response(mut response: Response<Body>) -> Result<HttpResponse, ApiError> {
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    // Bytes, not text: 8-bit MIME and Latin-1 error pages must reach the decoder.
    let body = response
        .body_mut()
        .with_config()
        .limit(MAX_RESPONSE_BODY)
        .read_to_vec()
        .map_err(ApiError::transport)?;

    Ok(HttpResponse { status, headers, body })
}
