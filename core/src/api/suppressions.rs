use crate::client::MailgunClient;
use crate::error::ApiError;
use crate::params::{escape_segment, Params};
use crate::response::Payload;
use crate::transport::Transport;

/// Bounces, unsubscribes, complaints and whitelists under `/v3/{domain}`.
impl<T: Transport> MailgunClient<T> {
    pub fn get_bounces(&self, params: &Params) -> Result<Payload, ApiError> {
        self.get(&self.suppression_path("bounces", None)?, params)
    }

    pub fn get_bounce(&self, address: &str) -> Result<Payload, ApiError> {
        self.get(&self.suppression_path("bounces", Some(address))?, &Params::new())
    }

    pub fn add_bounce(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.post(&self.suppression_path("bounces", None)?, attributes)
    }

    pub fn delete_bounce(&self, address: &str) -> Result<Payload, ApiError> {
        self.delete(&self.suppression_path("bounces", Some(address))?)
    }

    /// Clear the whole bounce list.
    pub fn delete_bounces(&self) -> Result<Payload, ApiError> {
        self.delete(&self.suppression_path("bounces", None)?)
    }

    pub fn get_unsubscribes(&self, params: &Params) -> Result<Payload, ApiError> {
        self.get(&self.suppression_path("unsubscribes", None)?, params)
    }

    pub fn get_unsubscribe(&self, address: &str) -> Result<Payload, ApiError> {
        self.get(&self.suppression_path("unsubscribes", Some(address))?, &Params::new())
    }

    pub fn add_unsubscribe(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.post(&self.suppression_path("unsubscribes", None)?, attributes)
    }

    pub fn delete_unsubscribe(&self, address_or_id: &str) -> Result<Payload, ApiError> {
        self.delete(&self.suppression_path("unsubscribes", Some(address_or_id))?)
    }

    pub fn get_complaints(&self, params: &Params) -> Result<Payload, ApiError> {
        self.get(&self.suppression_path("complaints", None)?, params)
    }

    pub fn get_complaint(&self, address: &str) -> Result<Payload, ApiError> {
        self.get(&self.suppression_path("complaints", Some(address))?, &Params::new())
    }

    pub fn add_complaint(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.post(&self.suppression_path("complaints", None)?, attributes)
    }

    pub fn delete_complaint(&self, address: &str) -> Result<Payload, ApiError> {
        self.delete(&self.suppression_path("complaints", Some(address))?)
    }

    pub fn get_whitelists(&self, params: &Params) -> Result<Payload, ApiError> {
        self.get(&self.suppression_path("whitelists", None)?, params)
    }

    pub fn get_whitelist(&self, address: &str) -> Result<Payload, ApiError> {
        self.get(&self.suppression_path("whitelists", Some(address))?, &Params::new())
    }

    pub fn add_whitelist(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.post(&self.suppression_path("whitelists", None)?, attributes)
    }

    pub fn delete_whitelist(&self, address: &str) -> Result<Payload, ApiError> {
        self.delete(&self.suppression_path("whitelists", Some(address))?)
    }

    fn suppression_path(&self, list: &str, address: Option<&str>) -> Result<String, ApiError> {
        let base = format!("/v3/{}/{list}", self.domain()?);
        Ok(match address {
            Some(address) => format!("{base}/{}", escape_segment(address)),
            None => base,
        })
    }
}
