use std::sync::Arc;

use bsefeed::{ClientBuilder, FetchMode};
use bsefeed_mock::MockTransport;

/// Scrip used when none is given on the command line.
pub const DEFAULT_SCRIP: &str = "500325";

/// First command-line argument, or [`DEFAULT_SCRIP`].
#[must_use]
pub fn scrip_from_args() -> String {
    std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SCRIP.to_string())
}

/// Client builder for demos.
///
/// Uses the in-memory transport when `BSEFEED_DEMOS_USE_MOCK` is set, so the
/// demos run offline in CI.
#[must_use]
pub fn builder(mode: FetchMode) -> ClientBuilder {
    let builder = ClientBuilder::new().mode(mode);
    if std::env::var("BSEFEED_DEMOS_USE_MOCK").is_ok() {
        println!("--- (Using mock transport) ---");
        builder.transport(Arc::new(MockTransport::new()))
    } else {
        builder
    }
}
