use crate::client::MailgunClient;
use crate::error::ApiError;
use crate::params::{escape_segment, Params};
use crate::response::Payload;
use crate::transport::Transport;

impl<T: Transport> MailgunClient<T> {
    pub fn get_webhooks(&self) -> Result<Payload, ApiError> {
        self.get(&self.webhooks_path()?, &Params::new())
    }

    pub fn get_webhook(&self, id: &str) -> Result<Payload, ApiError> {
        self.get(&self.webhook_path(id)?, &Params::new())
    }

    /// Register a webhook, e.g. `id=delivered&url=https://...`.
    pub fn add_webhook(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.post(&self.webhooks_path()?, attributes)
    }

    pub fn update_webhook(&self, id: &str, attributes: &Params) -> Result<Payload, ApiError> {
        self.put(&self.webhook_path(id)?, attributes)
    }

    pub fn delete_webhook(&self, id: &str) -> Result<Payload, ApiError> {
        self.delete(&self.webhook_path(id)?)
    }

    fn webhooks_path(&self) -> Result<String, ApiError> {
        Ok(format!("/v3/domains/{}/webhooks", self.domain()?))
    }

    fn webhook_path(&self, id: &str) -> Result<String, ApiError> {
        Ok(format!("{}/{}", self.webhooks_path()?, escape_segment(id)))
    }
}
