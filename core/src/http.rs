//! HTTP request and response values exchanged with a `Transport`.
//!
//! # Design
//! Requests and responses are plain data. The client builds an `HttpRequest`
//! without touching the network, a transport turns it into an `HttpResponse`,
//! and `response::decode` classifies the result. Only the fields the decoder
//! needs are kept (status, headers, body), so nothing is forwarded to the
//! underlying HTTP library's response object.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound request described as plain data.
///
/// `path` is absolute (it starts with `/`) and already carries the encoded
/// query string. The transport prefixes it with the API base URL. Bodies are
/// raw bytes so MIME documents with 8-bit content pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Set a header, replacing any existing value with the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// The body as UTF-8 text, if there is one and it decodes.
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref().and_then(|body| std::str::from_utf8(body).ok())
    }
}

/// A raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// True when the media type (parameters stripped) starts with
    /// `application/json`.
    pub fn is_json(&self) -> bool {
        self.content_type().is_some_and(is_json_media_type)
    }
}

pub(crate) fn is_json_media_type(content_type: &str) -> bool {
    let media_type = content_type.split(';').next().unwrap_or_default().trim();
    media_type
        .get(..16)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("application/json"))
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>) -> HttpResponse {
        HttpResponse {
            status,
            headers: content_type
                .map(|ct| vec![("Content-Type".to_string(), ct.to_string())])
                .unwrap_or_default(),
            body: Vec::new(),
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let resp = response(200, Some("text/plain"));
        assert_eq!(resp.header("content-type"), Some("text/plain"));
        assert_eq!(resp.header("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(resp.header("accept"), None);
    }

    #[test]
    fn json_detection_strips_parameters() {
        assert!(response(200, Some("application/json")).is_json());
        assert!(response(200, Some("application/json;charset=utf-8")).is_json());
        assert!(response(200, Some("Application/JSON; charset=utf-8")).is_json());
        assert!(!response(200, Some("text/html")).is_json());
        assert!(!response(200, Some("application/js")).is_json());
        assert!(!response(200, None).is_json());
    }

    #[test]
    fn status_predicates() {
        assert!(response(200, None).is_ok());
        assert!(!response(204, None).is_ok());
        assert!(response(204, None).is_success());
        assert!(response(401, None).is_client_error());
        assert!(response(503, None).is_server_error());
        assert!(!response(302, None).is_success());
    }

    #[test]
    fn set_header_replaces_existing_value() {
        let mut req = HttpRequest {
            method: HttpMethod::Get,
            path: "/v3/domains".to_string(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body: None,
        };
        req.set_header("accept", "message/rfc2822");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.header("Accept"), Some("message/rfc2822"));
    }

    #[test]
    fn method_display() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }

    #[test]
    fn body_text_rejects_invalid_utf8() {
        let mut req = HttpRequest {
            method: HttpMethod::Post,
            path: "/v3/domains".to_string(),
            headers: Vec::new(),
            body: Some(b"name=caf\xe9".to_vec()),
        };
        assert_eq!(req.body_text(), None);
        req.body = Some(b"name=x".to_vec());
        assert_eq!(req.body_text(), Some("name=x"));
    }
}
