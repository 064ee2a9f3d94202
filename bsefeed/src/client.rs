//! The two announcement clients and the contract they share.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bsefeed_types::{
    AnnouncementPage, BseError, ClientConfig, FetchMode, FetchResult, SearchQuery, build_pdf_url,
};
use url::Url;

use crate::extract::{self, Payload, ResponseBody};
use crate::transport::{Session, Transport, WireRequest, WireResponse};
use crate::wire;

/// Fetches one page of announcements.
///
/// Implementations never panic and never fail past this boundary: every
/// failure of a call is returned as the `Err` side of [`FetchResult`]. No
/// state is carried from one call to the next.
#[async_trait]
pub trait AnnouncementClient: Send + Sync {
    /// Fetch the page described by `query`.
    async fn fetch(&self, query: &SearchQuery) -> FetchResult;

    /// Configuration this client was built with.
    fn config(&self) -> &ClientConfig;

    /// Operating mode, fixed at construction.
    fn mode(&self) -> FetchMode {
        self.config().mode
    }

    /// Viewer URL for an attachment, using the configured base.
    fn pdf_url(&self, attachment: &str) -> Option<String> {
        build_pdf_url(&self.config().pdf_base, attachment)
    }
}

/// Bound one round trip by `timeout`, mapping expiry to a network-class error.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "bsefeed::client::round_trip",
        skip(session, req),
        fields(
            kind = ?req.kind,
            url = %req.url,
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        ),
    )
)]
pub(crate) async fn round_trip(
    session: &dyn Session,
    req: &WireRequest,
    timeout: Duration,
) -> Result<WireResponse, BseError> {
    (tokio::time::timeout(timeout, session.get(req)).await)
        .unwrap_or_else(|_| Err(BseError::timeout(timeout)))
}

/// Parse a configured URL, naming the setting in the error.
pub(crate) fn parse_url(what: &str, s: &str) -> Result<Url, BseError> {
    Url::parse(s).map_err(|e| BseError::config(format!("{what} `{s}`: {e}")))
}

/// Session mode: prime cookies, accept any status, classify the body.
pub struct SessionClient {
    config: ClientConfig,
    endpoint: Url,
    priming_page: Url,
    transport: Arc<dyn Transport>,
}

impl SessionClient {
    /// Build a session-mode client over `transport`.
    ///
    /// # Errors
    /// Returns `BseError::Config` if the endpoint or priming page is not a URL.
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, BseError> {
        let endpoint = parse_url("endpoint", &config.endpoint)?;
        let priming_page = parse_url("priming page", &config.priming_page)?;
        Ok(Self {
            config,
            endpoint,
            priming_page,
            transport,
        })
    }

    /// Best-effort navigational visit; failures are logged and swallowed.
    async fn prime(&self, session: &dyn Session) {
        let req = WireRequest::priming(self.priming_page.clone());
        match round_trip(session, &req, self.config.timeout).await {
            Ok(_resp) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(status = _resp.status, "session primed");
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "session priming failed; continuing");
            }
        }
    }
}

/// Turn any response into a page or an unparseable-payload error.
///
/// Status codes do not short-circuit: a redirect or error status whose body
/// still carries the payload is a success.
#[must_use]
pub fn classify(resp: &WireResponse) -> FetchResult {
    if resp.is_redirect() {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            status = resp.status,
            location = resp.location.as_deref().unwrap_or(""),
            "redirect observed; not following"
        );
    }
    let body = ResponseBody::new(resp.content_type.as_deref(), &resp.body);
    match extract::extract(&body) {
        Some((_strategy, payload)) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                strategy = _strategy,
                rows = payload.table.len(),
                "payload extracted"
            );
            Ok(payload.into_page())
        }
        None => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                status = resp.status,
                content_type = resp.content_type.as_deref().unwrap_or(""),
                "no JSON payload in response"
            );
            Err(BseError::unparseable(
                &resp.body,
                resp.status,
                resp.location.clone(),
            ))
        }
    }
}

#[async_trait]
impl AnnouncementClient for SessionClient {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bsefeed::session::fetch",
            skip(self, query),
            fields(scrip = %query.scrip, category = %query.category, page = query.page),
        )
    )]
    async fn fetch(&self, query: &SearchQuery) -> FetchResult {
        let session = self.transport.open_session()?;
        self.prime(session.as_ref()).await;

        let req = WireRequest::data(self.endpoint.clone(), wire::query_params(query));
        let resp = round_trip(session.as_ref(), &req, self.config.timeout).await?;
        classify(&resp)
    }

    fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Direct mode: one request, body assumed to be the raw JSON payload.
pub struct DirectClient {
    config: ClientConfig,
    endpoint: Url,
    transport: Arc<dyn Transport>,
}

impl DirectClient {
    /// Build a direct-mode client over `transport`.
    ///
    /// # Errors
    /// Returns `BseError::Config` if the endpoint is not a URL.
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, BseError> {
        let endpoint = parse_url("endpoint", &config.endpoint)?;
        Ok(Self {
            config,
            endpoint,
            transport,
        })
    }
}

/// Shape a trusted body; anything that is not the payload object becomes an empty page.
#[must_use]
pub fn shape_trusted(body: &str) -> AnnouncementPage {
    match serde_json::from_str::<Payload>(body) {
        Ok(payload) => payload.into_page(),
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "direct response is not a payload object; returning empty page");
            AnnouncementPage::default()
        }
    }
}

#[async_trait]
impl AnnouncementClient for DirectClient {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bsefeed::direct::fetch",
            skip(self, query),
            fields(scrip = %query.scrip, category = %query.category, page = query.page),
        )
    )]
    async fn fetch(&self, query: &SearchQuery) -> FetchResult {
        let session = self.transport.open_session()?;
        let req = WireRequest::data(self.endpoint.clone(), wire::query_params(query));
        let resp = round_trip(session.as_ref(), &req, self.config.timeout).await?;
        if !resp.is_success() {
            return Err(BseError::Status {
                status: resp.status,
            });
        }
        Ok(shape_trusted(&resp.body))
    }

    fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resp(status: u16, ct: &str, body: &str) -> WireResponse {
        WireResponse {
            status,
            content_type: Some(ct.to_string()),
            location: None,
            body: body.to_string(),
        }
    }

    #[test]
    fn classify_json_with_error_status_still_succeeds() {
        let page = classify(&resp(500, "application/json", r#"{"Table":[],"Table1":[{"ROWCNT":0}]}"#))
            .unwrap();
        assert_eq!(page.total_rows(), Some(0));
    }

    #[test]
    fn both_issuer_url_keys_do_not_reject_the_body() {
        let body = r#"{"Table":[{"HEADLINE":"x","URL":"https://a/","NSURL":"https://b/"}],"Table1":[{"ROWCNT":1}]}"#;
        let page = classify(&WireResponse::ok("application/json", body)).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.records[0].issuer_url(), Some("https://a/"));
        assert_eq!(shape_trusted(body), page);
    }

    #[test]
    fn null_metadata_and_repeated_keys_still_classify() {
        let page = classify(&resp(200, "application/json", r#"{"Table":[{"HEADLINE":"x"}],"Table1":[null]}"#))
            .unwrap();
        assert_eq!(page.len(), 1);
        assert!(page.meta.is_empty());

        let page = classify(&resp(
            200,
            "application/json",
            r#"{"Table":[{"HEADLINE":"x","HEADLINE":"y"}],"Table1":[]}"#,
        ))
        .unwrap();
        assert_eq!(page.records[0].headline, "y");
    }

    #[test]
    fn classify_html_page_yields_snippet() {
        let body = format!("<html>{}</html>", "x".repeat(1000));
        let err = classify(&resp(200, "text/html", &body)).unwrap_err();
        match err {
            BseError::UnparseablePayload { snippet, status, .. } => {
                assert_eq!(status, 200);
                assert_eq!(snippet.chars().count(), 400);
                assert!(body.starts_with(&snippet));
            }
            other => panic!("expected unparseable payload, got {other:?}"),
        }
    }

    #[test]
    fn classify_redirect_carries_location() {
        let mut r = resp(302, "text/html", "");
        r.location = Some("/error.html".into());
        let err = classify(&r).unwrap_err();
        assert!(matches!(
            err,
            BseError::UnparseablePayload { status: 302, location: Some(ref l), .. } if l == "/error.html"
        ));
    }

    #[test]
    fn trusted_garbage_shapes_to_empty_page() {
        let page = shape_trusted("<html>nope</html>");
        assert!(page.is_empty());
        assert!(page.meta.is_empty());
    }
}
