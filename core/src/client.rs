//! Request building and dispatch.
//!
//! # Design
//! `MailgunClient` owns an immutable `Config` and one `Transport`. Every
//! resource operation resolves its path, calls `build_request`, then passes
//! the request through `send`, which runs the transport and `response::decode`.
//! `build_request` does no I/O, so a request can also be built here, executed
//! elsewhere, and fed back through `response::decode`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::multipart::Form;
use crate::params::{escape_segment, Params};
use crate::response::{self, Payload};
use crate::transport::{Transport, UreqTransport};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Synchronous client for the Mailgun REST API.
#[derive(Debug, Clone)]
pub struct MailgunClient<T = UreqTransport> {
    config: Config,
    transport: T,
}

impl MailgunClient<UreqTransport> {
    /// Client bound to `https://<api_host>` over the default transport.
    pub fn new(config: Config) -> Self {
        let transport = UreqTransport::new(&config.base_url(), config.timeout());
        Self { config, transport }
    }

    /// # Errors
    /// Returns `ApiError::Config` when `MAILGUN_API_KEY` is unset.
    pub fn from_env() -> Result<Self, ApiError> {
        Config::from_env().map(Self::new)
    }
}

impl<T: Transport> MailgunClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build an authenticated request without sending it.
    ///
    /// `query` is appended to `path` when non-empty. `attributes` become a
    /// form body for POST, PUT and PATCH, and are ignored otherwise. `headers` are
    /// applied last and replace defaults with the same name.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &Params,
        attributes: &Params,
        headers: &[(&str, &str)],
    ) -> HttpRequest {
        let path = if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", query.encode())
        };

        let mut request = HttpRequest {
            method,
            path,
            headers: vec![
                ("Authorization".to_string(), self.basic_auth()),
                ("User-Agent".to_string(), self.config.user_agent().to_string()),
            ],
            body: None,
        };

        if matches!(method, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch) && !attributes.is_empty() {
            request.set_header("Content-Type", FORM_CONTENT_TYPE);
            request.body = Some(attributes.encode().into_bytes());
        }

        for (name, value) in headers {
            request.set_header(*name, *value);
        }

        request
    }

    /// Dispatch a request and decode its response.
    ///
    /// # Errors
    /// Returns transport failures unchanged and classifies non-2xx statuses.
    pub fn send(&self, request: HttpRequest) -> Result<Payload, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending Mailgun request");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, "received Mailgun response");
        response::decode(response)
    }

    fn basic_auth(&self) -> String {
        let credentials = format!("api:{}", self.config.api_key());
        format!("Basic {}", STANDARD.encode(credentials))
    }

    /// The configured domain, escaped for use in a path.
    pub(crate) fn domain(&self) -> Result<String, ApiError> {
        self.config.domain().name().map(escape_segment)
    }

    pub(crate) fn get(&self, path: &str, query: &Params) -> Result<Payload, ApiError> {
        self.get_with_headers(path, query, &[])
    }

    pub(crate) fn get_with_headers(
        &self,
        path: &str,
        query: &Params,
        headers: &[(&str, &str)],
    ) -> Result<Payload, ApiError> {
        let request = self.build_request(HttpMethod::Get, path, query, &Params::new(), headers);
        self.send(request)
    }

    pub(crate) fn post(&self, path: &str, attributes: &Params) -> Result<Payload, ApiError> {
        let request = self.build_request(HttpMethod::Post, path, &Params::new(), attributes, &[]);
        self.send(request)
    }

    pub(crate) fn post_multipart(&self, path: &str, form: &Form) -> Result<Payload, ApiError> {
        let mut request = self.build_request(HttpMethod::Post, path, &Params::new(), &Params::new(), &[]);
        request.set_header("Content-Type", form.content_type());
        request.body = Some(form.encode());
        self.send(request)
    }

    pub(crate) fn put(&self, path: &str, attributes: &Params) -> Result<Payload, ApiError> {
        let request = self.build_request(HttpMethod::Put, path, &Params::new(), attributes, &[]);
        self.send(request)
    }

    pub(crate) fn patch(&self, path: &str, attributes: &Params) -> Result<Payload, ApiError> {
        let request = self.build_request(HttpMethod::Patch, path, &Params::new(), attributes, &[]);
        self.send(request)
    }

    pub(crate) fn delete(&self, path: &str) -> Result<Payload, ApiError> {
        let request = self.build_request(HttpMethod::Delete, path, &Params::new(), &Params::new(), &[]);
        self.send(request)
    }
}
