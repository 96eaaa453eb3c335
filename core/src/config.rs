//! Client configuration, resolved once at construction.
//!
//! Each field takes the explicit builder value first and otherwise falls back
//! to the environment or a fixed default:
//!
//! | Field        | Fallback                                             |
//! |--------------|------------------------------------------------------|
//! | `domain`     | part of `MAILGUN_SMTP_LOGIN` after the last `@`      |
//! | `api_key`    | `MAILGUN_API_KEY` (required)                         |
//! | `api_host`   | `api.mailgun.net`                                    |
//! | `user_agent` | `mailgun-core/<version>`                             |
//!
//! A missing API key fails `build` immediately. A missing domain does not: it
//! resolves to `Domain::Unresolved`, which only fails when an operation needs
//! the domain in its path.

use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::ApiError;

pub const API_KEY_VAR: &str = "MAILGUN_API_KEY";
pub const SMTP_LOGIN_VAR: &str = "MAILGUN_SMTP_LOGIN";
pub const DEFAULT_API_HOST: &str = "api.mailgun.net";
pub const USER_AGENT: &str = concat!("mailgun-core/", env!("CARGO_PKG_VERSION"));

/// The sending domain that scopes most resource paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Domain {
    Named(String),
    Unresolved,
}

impl Domain {
    /// Derive the domain from an SMTP login such as `postmaster@example.com`.
    pub fn from_smtp_login(login: &str) -> Self {
        let domain = login.rsplit('@').next().unwrap_or(login);
        Domain::Named(domain.to_string())
    }

    /// The domain name, or the "No domain provided" error.
    pub fn name(&self) -> Result<&str, ApiError> {
        match self {
            Domain::Named(name) => Ok(name),
            Domain::Unresolved => Err(ApiError::no_domain()),
        }
    }
}

/// Immutable client configuration.
pub struct Config {
    domain: Domain,
    api_key: SecretString,
    api_host: String,
    user_agent: String,
    timeout: Option<Duration>,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Resolve every field from the process environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::builder().build()
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// `https://<api_host>`
    pub fn base_url(&self) -> String {
        format!("https://{}", self.api_host)
    }
}

impl Clone for Config {
    fn clone(&self) -> Self {
        Self {
            domain: self.domain.clone(),
            api_key: SecretString::new(self.api_key.expose_secret().clone()),
            api_host: self.api_host.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("domain", &self.domain)
            .field("api_key", &"[REDACTED]")
            .field("api_host", &self.api_host)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for `Config`.
#[derive(Default)]
pub struct ConfigBuilder {
    domain: Option<String>,
    api_key: Option<SecretString>,
    api_host: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl ConfigBuilder {
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    pub fn api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = Some(api_host.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Global timeout applied by the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve against the process environment.
    ///
    /// # Errors
    /// Returns `ApiError::Config` when no API key was given and
    /// `MAILGUN_API_KEY` is unset.
    pub fn build(self) -> Result<Config, ApiError> {
        self.build_with_env(|key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary environment lookup.
    ///
    /// # Errors
    /// Returns `ApiError::Config` when no API key can be resolved.
    pub fn build_with_env<F>(self, env: F) -> Result<Config, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let domain = match self.domain {
            Some(name) => Domain::Named(name),
            None => env(SMTP_LOGIN_VAR)
                .map(|login| Domain::from_smtp_login(&login))
                .unwrap_or(Domain::Unresolved),
        };

        let api_key = match self.api_key {
            Some(key) => key,
            None => env(API_KEY_VAR)
                .map(SecretString::new)
                .ok_or_else(|| ApiError::Config(format!("{API_KEY_VAR} is not set")))?,
        };

        Ok(Config {
            domain,
            api_key,
            api_host: self.api_host.unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            user_agent: self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()),
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn explicit_values_win() {
        let config = Config::builder()
            .domain("samples.mailgun.org")
            .api_key("xxx")
            .api_host("api.eu.mailgun.net")
            .build_with_env(env(&[
                (API_KEY_VAR, "from-env"),
                (SMTP_LOGIN_VAR, "postmaster@other.org"),
            ]))
            .unwrap();

        assert_eq!(config.domain(), &Domain::Named("samples.mailgun.org".to_string()));
        assert_eq!(config.api_key(), "xxx");
        assert_eq!(config.api_host(), "api.eu.mailgun.net");
        assert_eq!(config.base_url(), "https://api.eu.mailgun.net");
    }

    #[test]
    fn domain_defaults_from_smtp_login() {
        let config = Config::builder()
            .api_key("xxx")
            .build_with_env(env(&[(SMTP_LOGIN_VAR, "postmaster@samples.mailgun.org")]))
            .unwrap();
        assert_eq!(config.domain().name().unwrap(), "samples.mailgun.org");
    }

    #[test]
    fn smtp_login_uses_last_at_sign() {
        assert_eq!(
            Domain::from_smtp_login("odd@name@samples.mailgun.org"),
            Domain::Named("samples.mailgun.org".to_string())
        );
        assert_eq!(
            Domain::from_smtp_login("samples.mailgun.org"),
            Domain::Named("samples.mailgun.org".to_string())
        );
    }

    #[test]
    fn missing_domain_is_deferred() {
        let config = Config::builder().api_key("xxx").build_with_env(env(&[])).unwrap();
        assert_eq!(config.domain(), &Domain::Unresolved);

        let err = config.domain().name().unwrap_err();
        assert!(err.to_string().contains("No domain provided"));
    }

    #[test]
    fn api_key_defaults_from_env() {
        let config = Config::builder()
            .build_with_env(env(&[(API_KEY_VAR, "key-from-env")]))
            .unwrap();
        assert_eq!(config.api_key(), "key-from-env");
    }

    #[test]
    fn missing_api_key_fails_eagerly() {
        let err = Config::builder().domain("samples.mailgun.org").build_with_env(env(&[])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn defaults() {
        let config = Config::builder().api_key("xxx").build_with_env(env(&[])).unwrap();
        assert_eq!(config.api_host(), "api.mailgun.net");
        assert!(config.user_agent().starts_with("mailgun-core/"));
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = Config::builder().api_key("super-secret").build_with_env(env(&[])).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
