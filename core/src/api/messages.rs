use crate::client::MailgunClient;
use crate::error::ApiError;
use crate::multipart::Form;
use crate::params::{escape_segment, Params};
use crate::response::Payload;
use crate::transport::Transport;

impl<T: Transport> MailgunClient<T> {
    /// Fetch a stored message as JSON.
    pub fn get_message(&self, key: &str) -> Result<Payload, ApiError> {
        self.get(&self.stored_message_path(key)?, &Params::new())
    }

    /// Fetch a stored message in its raw MIME form. The API answers with
    /// `message/rfc2822`, so the payload is `Payload::Text`, or
    /// `Payload::Binary` when the message carries 8-bit headers.
    pub fn get_mime_message(&self, key: &str) -> Result<Payload, ApiError> {
        self.get_with_headers(
            &self.stored_message_path(key)?,
            &Params::new(),
            &[("Accept", "message/rfc2822")],
        )
    }

    /// Send a message built from form attributes (`from`, `to`, `subject`,
    /// `text`, `html`, `o:*`, `v:*`, ...). Repeat a key for multiple values.
    pub fn send_message(&self, attributes: &Params) -> Result<Payload, ApiError> {
        self.post(&format!("/v3/{}/messages", self.domain()?), attributes)
    }

    /// Send a pre-built MIME message to `recipients`. The message is posted
    /// byte for byte, so 8-bit content survives. Nothing is sent when every
    /// recipient is blank.
    pub fn send_mime(&self, recipients: &[&str], mime: impl AsRef<[u8]>) -> Result<Payload, ApiError> {
        let recipients: Vec<&str> = recipients
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .collect();
        if recipients.is_empty() {
            return Err(ApiError::no_recipients());
        }
        let path = format!("/v3/{}/messages.mime", self.domain()?);
        let form = Form::new()
            .text("to", recipients.join(","))
            .file("message", "message.mime", "message/rfc822", mime.as_ref().to_vec());
        self.post_multipart(&path, &form)
    }

    pub fn delete_message(&self, key: &str) -> Result<Payload, ApiError> {
        self.delete(&self.stored_message_path(key)?)
    }

    fn stored_message_path(&self, key: &str) -> Result<String, ApiError> {
        Ok(format!("/v3/domains/{}/messages/{}", self.domain()?, escape_segment(key)))
    }
}
