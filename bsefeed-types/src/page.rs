//! The value a successful fetch resolves to.

use serde::{Deserialize, Serialize};

use crate::{AnnouncementRecord, BseError, ResultMeta};

/// Outcome of one `fetch` call: a page of announcements or a diagnostic error.
pub type FetchResult = Result<AnnouncementPage, BseError>;

/// Announcements for one page plus the response metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementPage {
    /// Rows from `Table`, in provider order. Empty when the provider sent none.
    pub records: Vec<AnnouncementRecord>,
    /// First `Table1` row, or an empty record.
    pub meta: ResultMeta,
}

impl AnnouncementPage {
    /// Build a page from its parts.
    #[must_use]
    pub const fn new(records: Vec<AnnouncementRecord>, meta: ResultMeta) -> Self {
        Self { records, meta }
    }

    /// Total rows reported by the provider, if any.
    #[must_use]
    pub const fn total_rows(&self) -> Option<u64> {
        self.meta.total_rows()
    }

    /// Total rows reported by the provider, or the number of records on this page.
    #[must_use]
    pub fn total_rows_or_len(&self) -> u64 {
        self.total_rows()
            .unwrap_or_else(|| u64::try_from(self.records.len()).unwrap_or(u64::MAX))
    }

    /// Number of records on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the page carries no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
