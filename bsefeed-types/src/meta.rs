//! Response-level metadata from the first `Table1` row.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

/// Metadata record accompanying a page of announcements.
///
/// An empty record (the [`Default`]) stands in when the response carries no
/// `Table1` row. A missing row count is `None`, which is not the same as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMeta {
    /// Total matching rows across all pages (`ROWCNT`).
    #[serde(
        rename = "ROWCNT",
        default,
        deserialize_with = "lenient::count",
        skip_serializing_if = "Option::is_none"
    )]
    pub row_count: Option<u64>,
    /// Other metadata keys, preserved as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultMeta {
    /// Decode a `Table1` element; null, non-object, or undecodable elements are empty.
    #[must_use]
    pub fn from_row(row: Value) -> Self {
        match row {
            Value::Object(_) => serde_json::from_value(row).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Total row count, if the provider reported one.
    #[must_use]
    pub const fn total_rows(&self) -> Option<u64> {
        self.row_count
    }

    /// True when no metadata key at all was received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count.is_none() && self.extra.is_empty()
    }
}
