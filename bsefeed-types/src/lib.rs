//! Data model, configuration, and error types for the bsefeed announcement client.
//!
//! - `record`: one announcement row as delivered in the provider's `Table` array.
//! - `meta`: the single-row `Table1` metadata record.
//! - `query`: caller-supplied search parameters.
//! - `page`: the successful fetch value and the `FetchResult` alias.
//! - `config`: client configuration and operating mode.
#![warn(missing_docs)]

mod config;
mod error;
pub mod lenient;
mod meta;
mod page;
mod pdf;
mod query;
mod record;

pub use config::{
    ClientConfig, DEFAULT_ACCEPT, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_ENDPOINT, DEFAULT_PRIMING_PAGE,
    DEFAULT_USER_AGENT, FetchMode,
};
pub use error::{BseError, SNIPPET_CHARS, snippet};
pub use meta::ResultMeta;
pub use page::{AnnouncementPage, FetchResult};
pub use pdf::{DEFAULT_PDF_BASE, build_pdf_url};
pub use query::{EXCHANGE_TZ, SearchQuery, SearchScope, Subcategory, exchange_today};
pub use record::AnnouncementRecord;
