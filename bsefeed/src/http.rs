//! Production transport backed by `reqwest`.

use async_trait::async_trait;
use bsefeed_types::{BseError, ClientConfig, DEFAULT_ACCEPT};
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, LOCATION, REFERER,
    USER_AGENT,
};
use reqwest::redirect::Policy;

use crate::transport::{Session, Transport, WireRequest, WireResponse};

/// Browser-like HTTP transport.
///
/// Every session gets its own `reqwest::Client` with a private cookie store,
/// so cookies set by the priming visit reach the data request and nothing
/// leaks between fetches. Redirects are never followed.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    headers: HeaderMap,
}

impl ReqwestTransport {
    /// Build the header set from `config`.
    ///
    /// # Errors
    /// Returns `BseError::Config` if a configured header value is not a valid
    /// HTTP header value.
    pub fn new(config: &ClientConfig) -> Result<Self, BseError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("user agent", &config.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value("accept-language", &config.accept_language)?,
        );
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
        headers.insert(
            REFERER,
            header_value("referer", config.priming_page.as_str())?,
        );
        Ok(Self { headers })
    }

    /// Headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn header_value(what: &str, value: &str) -> Result<HeaderValue, BseError> {
    HeaderValue::from_str(value).map_err(|e| BseError::config(format!("{what}: {e}")))
}

impl Transport for ReqwestTransport {
    fn open_session(&self) -> Result<Box<dyn Session>, BseError> {
        let client = reqwest::Client::builder()
            .default_headers(self.headers.clone())
            .redirect(Policy::none())
            .cookie_store(true)
            .gzip(true)
            .build()
            .map_err(|e| BseError::network(describe(&e)))?;
        Ok(Box::new(ReqwestSession { client }))
    }
}

struct ReqwestSession {
    client: reqwest::Client,
}

#[async_trait]
impl Session for ReqwestSession {
    async fn get(&self, req: &WireRequest) -> Result<WireResponse, BseError> {
        let resp = self
            .client
            .get(req.url.clone())
            .query(&req.query)
            .send()
            .await
            .map_err(|e| BseError::network(describe(&e)))?;

        let status = resp.status().as_u16();
        let header = |name: HeaderName| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let location = header(LOCATION);
        let body = resp
            .text()
            .await
            .map_err(|e| BseError::network(describe(&e)))?;

        Ok(WireResponse {
            status,
            content_type,
            location,
            body,
        })
    }
}

/// Render an error with its source chain, e.g. `error sending request: dns error: ...`.
fn describe(e: &(dyn std::error::Error + 'static)) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        let msg = s.to_string();
        if !out.contains(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        source = s.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_headers_are_installed() {
        let t = ReqwestTransport::new(&ClientConfig::default()).unwrap();
        let h = t.headers();
        assert_eq!(h.get("x-requested-with").unwrap(), "XMLHttpRequest");
        assert_eq!(h.get(ACCEPT_LANGUAGE).unwrap(), "en-US,en;q=0.9");
        assert_eq!(
            h.get(REFERER).unwrap(),
            "https://www.bseindia.com/corporates/ann.html"
        );
        assert!(h.get(ACCEPT).unwrap().to_str().unwrap().starts_with("application/json"));
    }

    #[test]
    fn invalid_header_value_is_a_config_error() {
        let cfg = ClientConfig {
            user_agent: "bad\nagent".into(),
            ..ClientConfig::default()
        };
        let err = ReqwestTransport::new(&cfg).unwrap_err();
        assert!(matches!(err, BseError::Config(_)));
    }
}
