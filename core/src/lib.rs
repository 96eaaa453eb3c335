//! Synchronous client for the Mailgun REST API.
//!
//! # Overview
//! Each operation on `MailgunClient` maps to one HTTP verb and one path
//! template. The pipeline is the same for all of them: build an authenticated
//! `HttpRequest`, execute it through a `Transport`, then classify and decode
//! the `HttpResponse` into a `Payload` or an `ApiError`.
//!
//! # Design
//! - `Config` is resolved once from explicit values and the environment
//!   (`MAILGUN_API_KEY`, `MAILGUN_SMTP_LOGIN`) and never changes afterwards.
//! - Request building is pure. `MailgunClient::build_request` and
//!   `response::decode` can be used on their own when the caller owns the I/O.
//! - `UreqTransport` is the default blocking transport. Anything implementing
//!   `Transport` can stand in for it.
//! - Responses are schema-less: JSON bodies come back as `serde_json::Value`
//!   and can be wrapped in a `Record` for keyed access.
//!
//! ```no_run
//! use mailgun_core::{Config, MailgunClient, Params};
//!
//! # fn main() -> Result<(), mailgun_core::ApiError> {
//! let config = Config::builder()
//!     .domain("samples.mailgun.org")
//!     .api_key("key-xxx")
//!     .build()?;
//! let client = MailgunClient::new(config);
//!
//! client.send_message(
//!     &Params::new()
//!         .with("from", "postmaster@samples.mailgun.org")
//!         .with("to", ["alice@example.com", "bob@example.com"])
//!         .with("subject", "Hello")
//!         .with("text", "Testing some Mailgun awesomeness!"),
//! )?;
//! # Ok(())
//! # }
//! ```

mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod multipart;
pub mod params;
pub mod record;
pub mod response;
pub mod transport;

pub use client::MailgunClient;
pub use config::{Config, ConfigBuilder, Domain};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::Params;
pub use record::Record;
pub use response::Payload;
pub use transport::{Transport, UreqTransport};
