//! Client configuration shared between the builder and the transports.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pdf::DEFAULT_PDF_BASE;

/// Data endpoint serving announcement pages.
pub const DEFAULT_ENDPOINT: &str =
    "https://api.bseindia.com/BseIndiaAPI/api/AnnSubCategoryGetData/w";
/// Human-facing announcements page used to prime the session.
pub const DEFAULT_PRIMING_PAGE: &str = "https://www.bseindia.com/corporates/ann.html";
/// Browser-like user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
/// JSON-preferring accept header.
pub const DEFAULT_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";
/// Accept-Language header.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// How the client turns a response into a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FetchMode {
    /// Prime a cookie session, accept any status, and classify the body
    /// (JSON, embedded JSON, or an HTML failure page).
    #[default]
    Session,
    /// Trust the transport to return the raw `Table`/`Table1` JSON; no priming
    /// and no HTML extraction.
    Direct,
}

/// Configuration for building an announcement client.
///
/// URLs are kept as text and validated when the client is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Data endpoint the query is sent to.
    pub endpoint: String,
    /// Page visited before the data request in session mode; also the `Referer`.
    pub priming_page: String,
    /// Base prepended to attachment names to form viewer URLs.
    pub pdf_base: String,
    /// Operating mode, fixed for the lifetime of the client.
    pub mode: FetchMode,
    /// Upper bound for each individual round trip.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// `Accept-Language` header value.
    pub accept_language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            priming_page: DEFAULT_PRIMING_PAGE.to_string(),
            pdf_base: DEFAULT_PDF_BASE.to_string(),
            mode: FetchMode::default(),
            timeout: Duration::from_secs(20),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Timeout in whole milliseconds, saturating.
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_urls_parse() {
        for s in [DEFAULT_ENDPOINT, DEFAULT_PRIMING_PAGE, DEFAULT_PDF_BASE] {
            let url = url::Url::parse(s).unwrap();
            assert_eq!(url.as_str(), s);
        }
    }

    #[test]
    fn defaults_point_at_public_hosts() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert!(cfg.priming_page.ends_with("/corporates/ann.html"));
        assert_eq!(cfg.mode, FetchMode::Session);
        assert_eq!(cfg.timeout_ms(), 20_000);
    }

    #[test]
    fn config_roundtrips_through_json() {
        let cfg = ClientConfig {
            mode: FetchMode::Direct,
            timeout: Duration::from_millis(750),
            ..ClientConfig::default()
        };
        let json = serde_json::to_string(&cfg).expect("serialize config");
        let de: ClientConfig = serde_json::from_str(&json).expect("deserialize config");
        assert_eq!(de, cfg);
    }
}
