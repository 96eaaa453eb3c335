use crate::client::MailgunClient;
use crate::error::ApiError;
use crate::params::{escape_segment, Params};
use crate::response::Payload;
use crate::transport::Transport;

/// Domains and the per-domain settings under `/v3/domains/{domain}`.
impl<T: Transport> MailgunClient<T> {
    pub fn get_domains(&self, params: &Params) -> Result<Payload, ApiError> {
        self.get("/v3/domains", params)
    }

    pub fn get_domain(&self, name: &str) -> Result<Payload, ApiError> {
        self.get(&domain_path(name), &Params::new())
    }

    pub fn add_domain(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.post("/v3/domains", attributes)
    }

    pub fn delete_domain(&self, name: &str) -> Result<Payload, ApiError> {
        self.delete(&domain_path(name))
    }

    pub fn verify_domain(&self, name: &str) -> Result<Payload, ApiError> {
        self.put(&format!("{}/verify", domain_path(name)), &Params::new())
    }

    pub fn get_credentials(&self) -> Result<Payload, ApiError> {
        self.get(&self.settings_path("credentials")?, &Params::new())
    }

    pub fn add_credentials(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.post(&self.settings_path("credentials")?, attributes)
    }

    pub fn update_credentials(&self, login: &str, attributes: &Params) -> Result<Payload, ApiError> {
        self.put(&self.credential_path(login)?, attributes)
    }

    pub fn delete_credentials(&self, login: &str) -> Result<Payload, ApiError> {
        self.delete(&self.credential_path(login)?)
    }

    pub fn get_connection_settings(&self) -> Result<Payload, ApiError> {
        self.get(&self.settings_path("connection")?, &Params::new())
    }

    pub fn update_connection_settings(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.put(&self.settings_path("connection")?, attributes)
    }

    pub fn get_tracking_settings(&self) -> Result<Payload, ApiError> {
        self.get(&self.settings_path("tracking")?, &Params::new())
    }

    pub fn update_open_tracking_settings(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.put(&self.settings_path("tracking/open")?, attributes)
    }

    pub fn update_click_tracking_settings(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.put(&self.settings_path("tracking/click")?, attributes)
    }

    pub fn update_unsubscribe_tracking_settings(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.put(&self.settings_path("tracking/unsubscribe")?, attributes)
    }

    pub fn update_dkim_authority(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.put(&self.settings_path("dkim_authority")?, attributes)
    }

    pub fn update_dkim_selector(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.put(&self.settings_path("dkim_selector")?, attributes)
    }

    pub fn update_web_prefix(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.put(&self.settings_path("web_prefix")?, attributes)
    }

    /// `/v3/domains/{domain}/{suffix}` for the configured domain. `suffix` is
    /// a fixed literal and is not escaped.
    fn settings_path(&self, suffix: &str) -> Result<String, ApiError> {
        Ok(format!("/v3/domains/{}/{suffix}", self.domain()?))
    }

    fn credential_path(&self, login: &str) -> Result<String, ApiError> {
        Ok(format!("{}/{}", self.settings_path("credentials")?, escape_segment(login)))
    }
}

fn domain_path(name: &str) -> String {
    format!("/v3/domains/{}", escape_segment(name))
}
