use crate::client::MailgunClient;
use crate::error::ApiError;
use crate::params::{escape_segment, Params};
use crate::response::Payload;
use crate::transport::Transport;

/// Inbound routes. These are account-wide and need no domain.
impl<T: Transport> MailgunClient<T> {
    pub fn get_routes(&self, params: &Params) -> Result<Payload, ApiError> {
        self.get("/v3/routes", params)
    }

    pub fn get_route(&self, id: &str) -> Result<Payload, ApiError> {
        self.get(&route_path(id), &Params::new())
    }

    pub fn add_route(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.post("/v3/routes", attributes)
    }

    pub fn update_route(&self, id: &str, attributes: &Params) -> Result<Payload, ApiError> {
        self.put(&route_path(id), attributes)
    }

    pub fn delete_route(&self, id: &str) -> Result<Payload, ApiError> {
        self.delete(&route_path(id))
    }
}

fn route_path(id: &str) -> String {
    format!("/v3/routes/{}", escape_segment(id))
}
