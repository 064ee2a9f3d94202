//! Query-string encoding for the announcement endpoint.

use bsefeed_types::SearchQuery;
use chrono::NaiveDate;

/// Parameter names understood by the endpoint, in transmission order.
pub const PARAM_NAMES: [&str; 8] = [
    "pageno",
    "strCat",
    "strPrevDate",
    "strScrip",
    "strSearch",
    "strToDate",
    "strType",
    "subcategory",
];

/// Format a calendar date as compact `YYYYMMDD`.
///
/// The date is taken as-is: no time-zone conversion happens here.
#[must_use]
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Flatten `query` into the endpoint's parameter set.
///
/// Category, scrip, type, and subcategory codes pass through verbatim; the
/// `All` scope is sent as the primary-scope value.
#[must_use]
pub fn query_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let [pageno, cat, prev, scrip, search, to, typ, subcat] = PARAM_NAMES;
    vec![
        (pageno, query.page.to_string()),
        (cat, query.category.clone()),
        (prev, compact_date(query.from)),
        (scrip, query.scrip.clone()),
        (search, query.scope.wire_value().to_string()),
        (to, compact_date(query.to)),
        (typ, query.announcement_type.clone()),
        (subcat, query.subcategory.wire_value().to_string()),
    ]
}
