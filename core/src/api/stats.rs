use crate::client::MailgunClient;
use crate::error::ApiError;
use crate::params::{escape_segment, Params};
use crate::response::Payload;
use crate::transport::Transport;

/// Stats, events and tags.
impl<T: Transport> MailgunClient<T> {
    /// Aggregate counters, e.g. `event=[accepted, delivered]`.
    pub fn get_total_stats(&self, params: &Params) -> Result<Payload, ApiError> {
        self.get(&format!("/v3/{}/stats/total", self.domain()?), params)
    }

    #[deprecated(note = "use `get_total_stats`")]
    pub fn get_stats(&self, params: &Params) -> Result<Payload, ApiError> {
        self.get(&format!("/v3/{}/stats", self.domain()?), params)
    }

    pub fn get_events(&self, params: &Params) -> Result<Payload, ApiError> {
        self.get(&format!("/v3/{}/events", self.domain()?), params)
    }

    pub fn get_tags(&self, params: &Params) -> Result<Payload, ApiError> {
        self.get(&format!("/v3/{}/tags", self.domain()?), params)
    }

    pub fn get_tag(&self, id: &str) -> Result<Payload, ApiError> {
        self.get(&self.tag_path(id)?, &Params::new())
    }

    pub fn update_tag(&self, id: &str, attributes: &Params) -> Result<Payload, ApiError> {
        self.put(&self.tag_path(id)?, attributes)
    }

    pub fn get_tag_stats(&self, id: &str, params: &Params) -> Result<Payload, ApiError> {
        self.get(&format!("{}/stats", self.tag_path(id)?), params)
    }

    pub fn delete_tag(&self, id: &str) -> Result<Payload, ApiError> {
        self.delete(&self.tag_path(id)?)
    }

    fn tag_path(&self, id: &str) -> Result<String, ApiError> {
        Ok(format!("/v3/{}/tags/{}", self.domain()?, escape_segment(id)))
    }
}
