//! Caller-supplied search parameters.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Time zone the exchange calendar is kept in.
pub const EXCHANGE_TZ: chrono_tz::Tz = chrono_tz::Asia::Kolkata;

/// Which listing the scrip search applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SearchScope {
    /// Primary listing (`P`).
    #[default]
    Primary,
    /// Secondary listing (`S`).
    Secondary,
    /// Both listings. The endpoint has no such mode; sent as `P`.
    All,
}

impl SearchScope {
    /// Value transmitted as `strSearch`.
    #[must_use]
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::Primary | Self::All => "P",
            Self::Secondary => "S",
        }
    }
}

/// Subcategory filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Subcategory {
    /// No subcategory filter (`-1` on the wire).
    #[default]
    All,
    /// Provider subcategory code, passed through verbatim.
    Code(String),
}

impl Subcategory {
    /// Sentinel the endpoint uses for "all subcategories".
    pub const ALL_SENTINEL: &'static str = "-1";

    /// Value transmitted as `subcategory`.
    #[must_use]
    pub fn wire_value(&self) -> &str {
        match self {
            Self::All => Self::ALL_SENTINEL,
            Self::Code(code) => code,
        }
    }
}

impl From<&str> for Subcategory {
    fn from(s: &str) -> Self {
        if s == Self::ALL_SENTINEL {
            Self::All
        } else {
            Self::Code(s.to_string())
        }
    }
}

/// Search parameters for one page of announcements.
///
/// Validation (non-empty scrip, `from <= to`, positive page) is the caller's
/// job; the client only formats what it is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Scrip (ticker) code.
    pub scrip: String,
    /// Category label, e.g. `Company Update`.
    pub category: String,
    /// First calendar day of the range, exchange-local.
    pub from: NaiveDate,
    /// Last calendar day of the range (inclusive), exchange-local.
    pub to: NaiveDate,
    /// Listing scope.
    pub scope: SearchScope,
    /// Announcement type code, e.g. `C`.
    pub announcement_type: String,
    /// Subcategory filter.
    pub subcategory: Subcategory,
    /// 1-based page number.
    pub page: u32,
}

impl SearchQuery {
    /// Default category label.
    pub const DEFAULT_CATEGORY: &'static str = "Company Update";
    /// Default announcement type code.
    pub const DEFAULT_TYPE: &'static str = "C";

    /// Query for `scrip` over `[from, to]` with default filters and page 1.
    pub fn new(scrip: impl Into<String>, from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            scrip: scrip.into(),
            category: Self::DEFAULT_CATEGORY.to_string(),
            from,
            to,
            scope: SearchScope::default(),
            announcement_type: Self::DEFAULT_TYPE.to_string(),
            subcategory: Subcategory::default(),
            page: 1,
        }
    }

    /// Single-day query for the current calendar date at the exchange.
    pub fn for_today(scrip: impl Into<String>) -> Self {
        let today = exchange_today();
        Self::new(scrip, today, today)
    }

    /// Replace the category label.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Replace the listing scope.
    #[must_use]
    pub fn scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    /// Replace the announcement type code.
    #[must_use]
    pub fn announcement_type(mut self, code: impl Into<String>) -> Self {
        self.announcement_type = code.into();
        self
    }

    /// Replace the subcategory filter.
    #[must_use]
    pub fn subcategory(mut self, subcategory: Subcategory) -> Self {
        self.subcategory = subcategory;
        self
    }

    /// Replace the page number.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Current calendar date in [`EXCHANGE_TZ`].
#[must_use]
pub fn exchange_today() -> NaiveDate {
    Utc::now().with_timezone(&EXCHANGE_TZ).date_naive()
}
