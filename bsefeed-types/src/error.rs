use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of body characters kept in an [`BseError::UnparseablePayload`] snippet.
pub const SNIPPET_CHARS: usize = 400;

/// Unified error type for the bsefeed workspace.
///
/// Every failure of a single `fetch` call resolves to one of these variants.
/// Callers that only display errors can rely on the `Display` rendering; the
/// variants keep the underlying cause distinguishable for everyone else.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BseError {
    /// Transport-level failure (DNS, connect, reset, TLS, body read).
    #[error("Network error: {msg}")]
    Network {
        /// Human-readable cause reported by the transport.
        msg: String,
    },

    /// A single round trip exceeded the configured timeout.
    #[error("Network error: request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The transport rejected a non-success status (direct mode only).
    #[error("Network error: request failed with status code {status}")]
    Status {
        /// HTTP status code of the rejected response.
        status: u16,
    },

    /// The response matched none of the JSON extraction strategies.
    #[error("Received HTML instead of JSON. Snippet: {snippet}")]
    UnparseablePayload {
        /// Leading characters of the body, bounded by [`SNIPPET_CHARS`].
        snippet: String,
        /// HTTP status code of the unparseable response.
        status: u16,
        /// Redirect target, when the response carried a `Location` header.
        location: Option<String>,
    },

    /// Invalid construction-time configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BseError {
    /// Helper: build a `Network` error from any displayable cause.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network { msg: msg.into() }
    }

    /// Helper: build a `Timeout` error from the elapsed duration.
    #[must_use]
    pub fn timeout(timeout: std::time::Duration) -> Self {
        Self::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Helper: build an `UnparseablePayload` error, truncating `body` to the snippet bound.
    pub fn unparseable(body: &str, status: u16, location: Option<String>) -> Self {
        Self::UnparseablePayload {
            snippet: snippet(body),
            status,
            location,
        }
    }

    /// Helper: build a `Config` error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true for failures that happened before a usable response arrived.
    ///
    /// Network, timeout, and rejected-status errors fall in this class; an
    /// unparseable payload means the server did answer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::Status { .. }
        )
    }
}

/// Leading `SNIPPET_CHARS` characters of `body`, cut on a char boundary.
#[must_use]
pub fn snippet(body: &str) -> String {
    match body.char_indices().nth(SNIPPET_CHARS) {
        Some((idx, _)) => body[..idx].to_string(),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_keeps_short_bodies_whole() {
        assert_eq!(snippet("<html>oops</html>"), "<html>oops</html>");
    }

    #[test]
    fn snippet_truncates_on_char_boundary() {
        let body = "é".repeat(SNIPPET_CHARS + 10);
        let s = snippet(&body);
        assert_eq!(s.chars().count(), SNIPPET_CHARS);
        assert!(body.starts_with(&s));
    }

    #[test]
    fn timeout_renders_as_network_error() {
        let e = BseError::timeout(std::time::Duration::from_millis(1500));
        assert_eq!(e.to_string(), "Network error: request timed out after 1500 ms");
        assert!(e.is_transport());
    }

    #[test]
    fn unparseable_is_not_transport() {
        let e = BseError::unparseable("<html/>", 200, None);
        assert!(!e.is_transport());
        assert!(e.to_string().starts_with("Received HTML instead of JSON. Snippet: <html/>"));
    }
}
