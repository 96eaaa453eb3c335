use crate::client::MailgunClient;
use crate::error::ApiError;
use crate::params::{escape_segment, Params};
use crate::response::Payload;
use crate::transport::Transport;

/// Mailing lists and their members. Lists are addressed by their email
/// address and are not scoped to the configured domain.
impl<T: Transport> MailgunClient<T> {
    /// Paginated list index.
    pub fn get_lists(&self, params: &Params) -> Result<Payload, ApiError> {
        self.get("/v3/lists/pages", params)
    }

    pub fn get_list(&self, address: &str) -> Result<Payload, ApiError> {
        self.get(&list_path(address), &Params::new())
    }

    pub fn add_list(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.post("/v3/lists", attributes)
    }

    pub fn update_list(&self, address: &str, attributes: &Params) -> Result<Payload, ApiError> {
        self.put(&list_path(address), attributes)
    }

    pub fn delete_list(&self, address: &str) -> Result<Payload, ApiError> {
        self.delete(&list_path(address))
    }

    /// Paginated member index.
    pub fn get_list_members(&self, list_address: &str, params: &Params) -> Result<Payload, ApiError> {
        self.get(&format!("{}/members/pages", list_path(list_address)), params)
    }

    pub fn get_list_member(&self, list_address: &str, member_address: &str) -> Result<Payload, ApiError> {
        self.get(&member_path(list_address, member_address), &Params::new())
    }

    pub fn add_list_member(&self, list_address: &str, attributes: &Params) -> Result<Payload, ApiError> {
        self.post(&format!("{}/members", list_path(list_address)), attributes)
    }

    pub fn update_list_member(
        &self,
        list_address: &str,
        member_address: &str,
        attributes: &Params,
    ) -> Result<Payload, ApiError> {
        self.put(&member_path(list_address, member_address), attributes)
    }

    pub fn delete_list_member(&self, list_address: &str, member_address: &str) -> Result<Payload, ApiError> {
        self.delete(&member_path(list_address, member_address))
    }
}

fn list_path(address: &str) -> String {
    format!("/v3/lists/{}", escape_segment(address))
}

fn member_path(list_address: &str, member_address: &str) -> String {
    format!("{}/members/{}", list_path(list_address), escape_segment(member_address))
}
