//! bsefeed retrieves BSE corporate announcements and turns the exchange's
//! semi-structured responses into typed pages.
//!
//! Overview
//! - The endpoint answers with JSON, with JSON embedded in HTML or a script
//!   assignment, or with an HTML error page, depending on session state and
//!   content negotiation.
//! - [`SessionClient`] primes a cookie session on the human-facing page, never
//!   follows redirects, accepts every status, and runs the extraction strategy
//!   chain in [`extract`] over whatever comes back.
//! - [`DirectClient`] trusts the transport to return the raw payload and skips
//!   priming and HTML extraction.
//! - Both implement [`AnnouncementClient`]; the mode is picked once, at
//!   construction, by [`ClientBuilder`].
//!
//! Key behaviors
//! - `fetch` never fails past its boundary: every failure is the `Err` side of
//!   [`FetchResult`], with the cause kept distinguishable in [`BseError`].
//! - Each round trip is bounded by the configured timeout; expiry is reported
//!   as a network error.
//! - Every `fetch` opens its own session. No cookies, connections, or other
//!   state are shared between calls.
//!
//! Example
//! ```rust,ignore
//! use bsefeed::{ClientBuilder, SearchQuery, SearchScope};
//!
//! let client = ClientBuilder::new().build()?;
//! let query = SearchQuery::for_today("543985").scope(SearchScope::All);
//! match client.fetch(&query).await {
//!     Ok(page) => {
//!         for rec in &page.records {
//!             println!("{} {}", rec.timestamp, rec.display_headline());
//!         }
//!         println!("total: {:?}", page.total_rows());
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
#![warn(missing_docs)]

mod builder;
mod client;
/// Payload extraction strategies.
pub mod extract;
mod http;
/// The transport seam and its request/response types.
pub mod transport;
/// Query-string encoding for the announcement endpoint.
pub mod wire;

pub use builder::ClientBuilder;
pub use client::{AnnouncementClient, DirectClient, SessionClient, classify, shape_trusted};
pub use http::ReqwestTransport;
pub use transport::{RequestKind, Session, Transport, WireRequest, WireResponse};

pub use bsefeed_types::{
    AnnouncementPage, AnnouncementRecord, BseError, ClientConfig, FetchMode, FetchResult,
    ResultMeta, SearchQuery, SearchScope, Subcategory, build_pdf_url, exchange_today,
};
