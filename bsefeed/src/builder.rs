//! Construction-time selection of the client mode and transport.

use std::sync::Arc;
use std::time::Duration;

use bsefeed_types::{BseError, ClientConfig, FetchMode};

use crate::client::{AnnouncementClient, DirectClient, SessionClient, parse_url};
use crate::http::ReqwestTransport;
use crate::transport::Transport;

/// Fluent builder for an [`AnnouncementClient`].
///
/// URL and header problems are reported by [`ClientBuilder::build`].
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Start from the default configuration (session mode, public hosts).
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(ClientConfig::default())
    }

    /// Start from an existing configuration.
    #[must_use]
    pub const fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// Select the operating mode.
    #[must_use]
    pub fn mode(mut self, mode: FetchMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the data endpoint.
    #[must_use]
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    /// Set the priming page (also sent as `Referer`).
    #[must_use]
    pub fn priming_page(mut self, url: impl Into<String>) -> Self {
        self.config.priming_page = url.into();
        self
    }

    /// Set the attachment viewer base.
    #[must_use]
    pub fn pdf_base(mut self, base: impl Into<String>) -> Self {
        self.config.pdf_base = base.into();
        self
    }

    /// Bound each round trip by `timeout`.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Override the `Accept-Language` header.
    #[must_use]
    pub fn accept_language(mut self, lang: impl Into<String>) -> Self {
        self.config.accept_language = lang.into();
        self
    }

    /// Use `transport` instead of the default `reqwest` transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Configuration as currently assembled.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate and build the client for the configured mode.
    ///
    /// # Errors
    /// Returns `BseError::Config` for an unparseable URL, a zero timeout, or
    /// a header value the default transport cannot send.
    pub fn build(self) -> Result<Arc<dyn AnnouncementClient>, BseError> {
        parse_url("endpoint", &self.config.endpoint)?;
        parse_url("priming page", &self.config.priming_page)?;
        if self.config.timeout.is_zero() {
            return Err(BseError::config("timeout must be non-zero"));
        }
        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(&self.config)?) as Arc<dyn Transport>,
        };
        let client: Arc<dyn AnnouncementClient> = match self.config.mode {
            FetchMode::Session => Arc::new(SessionClient::new(self.config, transport)?),
            FetchMode::Direct => Arc::new(DirectClient::new(self.config, transport)?),
        };
        Ok(client)
    }
}
