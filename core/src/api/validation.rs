use crate::client::MailgunClient;
use crate::error::ApiError;
use crate::params::{escape_segment, Params};
use crate::response::Payload;
use crate::transport::Transport;

/// Email address validation (v4).
impl<T: Transport> MailgunClient<T> {
    pub fn validate_address(&self, address: &str) -> Result<Payload, ApiError> {
        self.get("/v4/address/validate", &Params::new().with("address", address))
    }

    pub fn get_bulk_validations(&self) -> Result<Payload, ApiError> {
        self.get("/v4/address/validate/bulk", &Params::new())
    }

    pub fn create_bulk_validation(&self, list_id: &str) -> Result<Payload, ApiError> {
        self.post(&bulk_path(list_id), &Params::new())
    }

    pub fn get_bulk_validation(&self, list_id: &str) -> Result<Payload, ApiError> {
        self.get(&bulk_path(list_id), &Params::new())
    }

    pub fn cancel_bulk_validation(&self, list_id: &str) -> Result<Payload, ApiError> {
        self.delete(&bulk_path(list_id))
    }
}

fn bulk_path(list_id: &str) -> String {
    format!("/v4/address/validate/bulk/{}", escape_segment(list_id))
}
