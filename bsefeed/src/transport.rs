//! The HTTP seam between the clients and the network.
//!
//! Clients never talk to `reqwest` directly: they open a [`Session`] from a
//! [`Transport`] once per `fetch` and issue their round trips on it. Tests
//! inject scripted transports through the same traits.

use async_trait::async_trait;
use bsefeed_types::BseError;
use url::Url;

/// Which step of a fetch a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Navigational visit that establishes session cookies.
    Priming,
    /// The announcement data request.
    Data,
}

/// A GET request as the client wants it sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// Step of the fetch this request performs.
    pub kind: RequestKind,
    /// Target URL without the query string.
    pub url: Url,
    /// Query parameters, in transmission order.
    pub query: Vec<(&'static str, String)>,
}

impl WireRequest {
    /// Priming visit to `page`.
    #[must_use]
    pub const fn priming(page: Url) -> Self {
        Self {
            kind: RequestKind::Priming,
            url: page,
            query: Vec::new(),
        }
    }

    /// Data request to `endpoint` with `query`.
    #[must_use]
    pub const fn data(endpoint: Url, query: Vec<(&'static str, String)>) -> Self {
        Self {
            kind: RequestKind::Data,
            url: endpoint,
            query,
        }
    }

    /// Value of the query parameter `name`, if present.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Whatever came back, whatever the status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireResponse {
    /// HTTP status code. Redirects are reported, never followed.
    pub status: u16,
    /// Declared `Content-Type`, if any.
    pub content_type: Option<String>,
    /// `Location` header, if any.
    pub location: Option<String>,
    /// Response body decoded as text.
    pub body: String,
}

impl WireResponse {
    /// A `200 OK` response with the given content type and body.
    pub fn ok(content_type: &str, body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type.to_string()),
            location: None,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// True for 3xx statuses.
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        self.status >= 300 && self.status < 400
    }
}

/// One browsing session: requests issued on it share cookies.
#[async_trait]
pub trait Session: Send + Sync {
    /// Send `req` and return the response. Only transport-level failures are errors.
    async fn get(&self, req: &WireRequest) -> Result<WireResponse, BseError>;
}

/// Factory for independent sessions.
pub trait Transport: Send + Sync {
    /// Open a fresh session with an empty cookie jar.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    fn open_session(&self) -> Result<Box<dyn Session>, BseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_lookup_by_name() {
        let url = Url::parse("https://example.test/w").unwrap();
        let req = WireRequest::data(url, vec![("pageno", "2".into()), ("strSearch", "P".into())]);
        assert_eq!(req.param("strSearch"), Some("P"));
        assert_eq!(req.param("missing"), None);
        assert_eq!(req.kind, RequestKind::Data);
    }

    #[test]
    fn status_classes() {
        let mut r = WireResponse::ok("text/html", "");
        assert!(r.is_success());
        r.status = 302;
        assert!(r.is_redirect() && !r.is_success());
    }
}
