//! Payload extraction: from a semi-structured body to the `Table`/`Table1` shape.
//!
//! The endpoint answers with plain JSON, with the JSON object embedded in an
//! HTML or script body, or with an HTML error page. Extraction is an ordered
//! chain of pure strategies; the first one that yields a payload wins.

use std::sync::LazyLock;

use bsefeed_types::{AnnouncementPage, AnnouncementRecord, ResultMeta};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Body of a response together with its declared content type.
#[derive(Debug, Clone, Copy)]
pub struct ResponseBody<'a> {
    /// Declared `Content-Type`, if any.
    pub content_type: Option<&'a str>,
    /// Decoded body text.
    pub text: &'a str,
}

impl<'a> ResponseBody<'a> {
    /// Pair a body with its content type.
    #[must_use]
    pub const fn new(content_type: Option<&'a str>, text: &'a str) -> Self {
        Self { content_type, text }
    }
}

/// The provider's top-level object: result rows plus a metadata record.
///
/// Rows must be JSON objects; a repeated key keeps its last value and a row
/// whose fields do not fit is kept verbatim in its `extra` map. Only the first
/// `Table1` element is meaningful, and it shapes to an empty record when it is
/// missing, null, or not an object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Payload {
    /// Result rows.
    #[serde(rename = "Table", default, deserialize_with = "rows")]
    pub table: Vec<AnnouncementRecord>,
    /// Metadata from the first `Table1` element.
    #[serde(rename = "Table1", default, deserialize_with = "first_meta")]
    pub meta: ResultMeta,
}

impl Payload {
    /// Parse `text` as a complete payload object.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Shape into a page.
    #[must_use]
    pub fn into_page(self) -> AnnouncementPage {
        AnnouncementPage::new(self.table, self.meta)
    }
}

fn rows<'de, D>(d: D) -> Result<Vec<AnnouncementRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<Map<String, Value>>>::deserialize(d)?.unwrap_or_default();
    Ok(rows.into_iter().map(AnnouncementRecord::from_row).collect())
}

fn first_meta<'de, D>(d: D) -> Result<ResultMeta, D::Error>
where
    D: Deserializer<'de>,
{
    let table1 = Option::<Vec<Value>>::deserialize(d)?.unwrap_or_default();
    Ok(table1
        .into_iter()
        .next()
        .map(ResultMeta::from_row)
        .unwrap_or_default())
}

/// A single extraction strategy.
pub type Strategy = fn(&ResponseBody<'_>) -> Option<Payload>;

/// Strategies in the order they are tried, with the names used in logs.
pub const STRATEGIES: [(&str, Strategy); 3] = [
    ("direct-json", direct_json),
    ("embedded-object", embedded_object),
    ("script-assignment", script_assignment),
];

/// Run the strategy chain; returns the matching strategy's name and its payload.
#[must_use]
pub fn extract(body: &ResponseBody<'_>) -> Option<(&'static str, Payload)> {
    STRATEGIES
        .iter()
        .find_map(|(name, strategy)| strategy(body).map(|p| (*name, p)))
}

/// Parse the whole body as JSON when it is declared or looks like JSON.
#[must_use]
pub fn direct_json(body: &ResponseBody<'_>) -> Option<Payload> {
    let trimmed = body.text.trim_start_matches('\u{feff}').trim();
    let declared = body
        .content_type
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));
    if declared || trimmed.starts_with('{') {
        Payload::parse(trimmed)
    } else {
        None
    }
}

// First `{ ... "Table": [ ... ] ... }` region, each part scanned lazily.
static EMBEDDED_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{[\s\S]*?"Table"\s*:\s*\[.*?\][\s\S]*?\}"#).expect("valid regex")
});

// `var x = { ... "Table": [ ... ] ... };` with the object captured.
static SCRIPT_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:var|let|const)\s+[A-Za-z0-9_$]+\s*=\s*(\{[\s\S]*?"Table"\s*:\s*\[.*?\][\s\S]*?\});"#,
    )
    .expect("valid regex")
});

static TABLE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""Table"\s*:\s*\["#).expect("valid regex"));

/// Find an object containing a `"Table"` array inside arbitrary markup.
///
/// Tries the lazily scanned region first (nearest closing brace), then the
/// brace-balanced object that encloses the first `"Table"` key.
#[must_use]
pub fn embedded_object(body: &ResponseBody<'_>) -> Option<Payload> {
    let text = body.text;
    let nearest = EMBEDDED_OBJECT.find(text).map(|m| m.as_str());
    nearest
        .and_then(Payload::parse)
        .or_else(|| enclosing_object(text).and_then(Payload::parse))
}

/// Take the right-hand side of a script variable assignment.
#[must_use]
pub fn script_assignment(body: &ResponseBody<'_>) -> Option<Payload> {
    SCRIPT_ASSIGNMENT
        .captures(body.text)
        .and_then(|c| c.get(1))
        .and_then(|m| Payload::parse(m.as_str()))
}

const MAX_ENCLOSING_CANDIDATES: usize = 64;

/// Smallest balanced `{...}` region that contains the first `"Table"` key.
fn enclosing_object(text: &str) -> Option<&str> {
    let key = TABLE_KEY.find(text)?.start();
    let mut cursor = key;
    for _ in 0..MAX_ENCLOSING_CANDIDATES {
        let open = text[..cursor].rfind('{')?;
        if let Some(close) = balanced_end(text, open) {
            if close > key {
                return Some(&text[open..=close]);
            }
        }
        cursor = open;
    }
    None
}

/// Index of the `}` closing the object opened at `open`, honoring JSON strings.
fn balanced_end(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, b) in text.bytes().enumerate().skip(open) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{"Table":[{"SCRIP_CD":543985,"HEADLINE":"Outcome of board meeting","CRITICALNEWS":"1"}],"Table1":[{"ROWCNT":"1"}]}"#;

    fn body(ct: Option<&'static str>, text: &'static str) -> ResponseBody<'static> {
        ResponseBody::new(ct, text)
    }

    #[test]
    fn direct_json_by_content_type_or_leading_brace() {
        let p = direct_json(&body(Some("application/json; charset=utf-8"), JSON)).unwrap();
        assert_eq!(p.table.len(), 1);
        assert!(direct_json(&body(Some("text/html"), "  \n{\"Table\":[]}")).is_some());
        assert!(direct_json(&body(Some("text/html"), "<html>{\"Table\":[]}</html>")).is_none());
    }

    #[test]
    fn missing_and_null_tables_shape_to_empty() {
        let page = Payload::parse(r#"{"Table":null}"#).unwrap().into_page();
        assert!(page.records.is_empty());
        assert!(page.meta.is_empty());

        let page = Payload::parse(r#"{"Table":[],"Table1":[]}"#).unwrap().into_page();
        assert!(page.meta.is_empty());
    }

    #[test]
    fn row_with_both_url_keys_is_kept() {
        let p = Payload::parse(
            r#"{"Table":[{"HEADLINE":"x","URL":"https://a/","NSURL":"https://b/"}],"Table1":[{"ROWCNT":1}]}"#,
        )
        .unwrap();
        assert_eq!(p.table.len(), 1);
        assert_eq!(p.table[0].issuer_url(), Some("https://a/"));
        assert_eq!(p.meta.total_rows(), Some(1));
    }

    #[test]
    fn null_metadata_row_shapes_to_empty() {
        let page = Payload::parse(r#"{"Table":[{"HEADLINE":"x"}],"Table1":[null]}"#)
            .unwrap()
            .into_page();
        assert_eq!(page.records[0].headline, "x");
        assert!(page.meta.is_empty());
    }

    #[test]
    fn repeated_row_key_keeps_last_value() {
        let p = Payload::parse(r#"{"Table":[{"HEADLINE":"x","HEADLINE":"y"}],"Table1":[]}"#)
            .unwrap();
        assert_eq!(p.table[0].headline, "y");
    }

    #[test]
    fn non_object_json_is_not_a_payload() {
        assert!(Payload::parse("[1,2,3]").is_none());
        assert!(Payload::parse(r#"{"Table":"nope"}"#).is_none());
    }

    #[test]
    fn embedded_rows_must_be_objects() {
        let html = r#"<div>{"Table":[1]}</div>"#;
        // Flat rows are not objects, so this is still not a payload.
        assert!(embedded_object(&body(None, html)).is_none());
        let html = r#"<p>data: {"Table":[]} end</p>"#;
        assert!(embedded_object(&body(None, html)).is_some());
    }

    #[test]
    fn enclosing_object_recovers_nested_rows() {
        let html = format!("<html><body><pre>{JSON}</pre></body></html>");
        let region = enclosing_object(&html).unwrap();
        assert_eq!(region, JSON);
    }

    #[test]
    fn enclosing_object_skips_unrelated_braces() {
        let html = format!("<style>a{{color:red}}</style><script>render({JSON})</script>");
        let p = embedded_object(&ResponseBody::new(None, &html)).unwrap();
        assert_eq!(p.meta.total_rows(), Some(1));
    }

    #[test]
    fn script_assignment_takes_statement_rhs() {
        let html = format!("<script>var annData = {JSON};\nrender(annData);</script>");
        let p = script_assignment(&ResponseBody::new(Some("text/html"), &html)).unwrap();
        assert_eq!(p.table[0].scrip_code, "543985");
    }

    #[test]
    fn balanced_end_ignores_braces_in_strings() {
        let s = r#"{"a":"}{","b":{"c":1}} tail"#;
        assert_eq!(balanced_end(s, 0), Some(s.find(" tail").unwrap() - 1));
    }

    #[test]
    fn chain_reports_matching_strategy() {
        let html = format!("<html><script>var x = {JSON};</script></html>");
        let (name, _) = extract(&ResponseBody::new(Some("text/html"), &html)).unwrap();
        assert_eq!(name, "embedded-object");

        let (name, _) = extract(&body(Some("application/json"), JSON)).unwrap();
        assert_eq!(name, "direct-json");

        assert!(extract(&body(Some("text/html"), "<html>Access denied</html>")).is_none());
    }

    #[test]
    fn chain_falls_through_to_script_assignment() {
        let html = format!("<script>render({{\"Table\":[1]}}); var d = {JSON};</script>");
        let (name, p) = extract(&ResponseBody::new(Some("text/html"), &html)).unwrap();
        assert_eq!(name, "script-assignment");
        assert_eq!(p.table[0].scrip_code, "543985");
    }
}
