//! Resource operations, one module per area of the API.
//!
//! Each operation maps to exactly one verb and one path template. Values
//! substituted into a path are segment-encoded, and domain-scoped paths fail
//! with "No domain provided" before anything is sent when the client has no
//! domain.

mod domains;
mod ips;
mod lists;
mod messages;
mod routes;
mod stats;
mod suppressions;
mod validation;
mod webhooks;
