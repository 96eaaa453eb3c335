use crate::client::MailgunClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::{escape_segment, Params};
use crate::response::Payload;
use crate::transport::Transport;

/// Dedicated IPs and IP pools for the account, and their assignment to the
/// domain.
impl<T: Transport> MailgunClient<T> {
    pub fn get_all_ips(&self, params: &Params) -> Result<Payload, ApiError> {
        self.get("/v3/ips", params)
    }

    pub fn get_ip(&self, address: &str) -> Result<Payload, ApiError> {
        self.get(&format!("/v3/ips/{}", escape_segment(address)), &Params::new())
    }

    /// IPs assigned to the configured domain.
    pub fn get_ips(&self) -> Result<Payload, ApiError> {
        self.get(&self.domain_ips_path()?, &Params::new())
    }

    pub fn add_ip(&self, address: &str) -> Result<Payload, ApiError> {
        self.post(&self.domain_ips_path()?, &Params::new().with("ip", address))
    }

    pub fn delete_ip(&self, address: &str) -> Result<Payload, ApiError> {
        self.delete(&format!("{}/{}", self.domain_ips_path()?, escape_segment(address)))
    }

    pub fn get_ip_pools(&self) -> Result<Payload, ApiError> {
        self.get("/v3/ips/pools", &Params::new())
    }

    /// Create a pool from `name`, `description` and repeated `ip` attributes.
    pub fn add_ip_pool(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.post("/v3/ips/pools", attributes)
    }

    pub fn get_ip_pool(&self, pool_id: &str) -> Result<Payload, ApiError> {
        self.get(&ip_pool_path(pool_id), &Params::new())
    }

    /// Partial update: `name`, `description`, `add_ip`, `remove_ip`.
    pub fn update_ip_pool(&self, pool_id: &str, attributes: &Params) -> Result<Payload, ApiError> {
        self.patch(&ip_pool_path(pool_id), attributes)
    }

    /// `params` names the replacement (`ip` or `pool_id`) for domains still
    /// linked to the pool.
    pub fn delete_ip_pool(&self, pool_id: &str, params: &Params) -> Result<Payload, ApiError> {
        let request = self.build_request(HttpMethod::Delete, &ip_pool_path(pool_id), params, &Params::new(), &[]);
        self.send(request)
    }

    fn domain_ips_path(&self) -> Result<String, ApiError> {
        Ok(format!("/v3/domains/{}/ips", self.domain()?))
    }
}

fn ip_pool_path(pool_id: &str) -> String {
    format!("/v3/ips/pools/{}", escape_segment(pool_id))
}
