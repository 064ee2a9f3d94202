// Shared setup for the integration tests; not every binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use bsefeed::{AnnouncementClient, ClientBuilder, FetchMode, SearchQuery};
use bsefeed_mock::MockTransport;
use chrono::NaiveDate;

pub const SCRIP: &str = "543985";

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn query() -> SearchQuery {
    SearchQuery::new(SCRIP, day(2024, 5, 9), day(2024, 5, 10))
}

pub fn client(mock: &MockTransport, mode: FetchMode) -> Arc<dyn AnnouncementClient> {
    ClientBuilder::new()
        .mode(mode)
        .timeout(Duration::from_secs(2))
        .transport(Arc::new(mock.clone()))
        .build()
        .unwrap_or_else(|e| panic!("client builds: {e}"))
}
