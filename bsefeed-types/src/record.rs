//! One exchange disclosure as returned in the `Table` array.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

/// A single corporate announcement.
///
/// Field names follow the upstream row keys on the wire. Keys this type does
/// not model are kept verbatim in [`AnnouncementRecord::extra`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementRecord {
    /// Dissemination timestamp in exchange-local time, as sent (e.g. `2024-05-10T18:34:12.77`).
    #[serde(rename = "DT_TM", default, deserialize_with = "lenient::text")]
    pub timestamp: String,
    /// Issuer display name.
    #[serde(rename = "SLONGNAME", default, deserialize_with = "lenient::text")]
    pub issuer_name: String,
    /// Headline text.
    #[serde(rename = "HEADLINE", default, deserialize_with = "lenient::text")]
    pub headline: String,
    /// News subject, shown when the headline is empty.
    #[serde(rename = "NEWSSUB", default, deserialize_with = "lenient::opt_text")]
    pub news_subject: Option<String>,
    /// Subcategory label.
    #[serde(rename = "SUBCATNAME", default, deserialize_with = "lenient::text")]
    pub subcategory: String,
    /// Criticality flag; `None` when the upstream value is missing or unrecognized.
    #[serde(rename = "CRITICALNEWS", default, deserialize_with = "lenient::flag")]
    pub critical: Option<bool>,
    /// Attachment filename.
    #[serde(rename = "ATTACHMENTNAME", default, deserialize_with = "lenient::opt_text")]
    pub attachment_name: Option<String>,
    /// Attachment size in bytes.
    #[serde(rename = "Fld_Attachsize", default, deserialize_with = "lenient::count")]
    pub attachment_size: Option<u64>,
    /// Issuer ticker (scrip) code.
    #[serde(rename = "SCRIP_CD", default, deserialize_with = "lenient::text")]
    pub scrip_code: String,
    /// Upstream PDF indicator.
    #[serde(rename = "PDFFLAG", default, deserialize_with = "lenient::flag")]
    pub pdf_flag: Option<bool>,
    /// Direct issuer-page URL.
    #[serde(rename = "URL", default, deserialize_with = "lenient::opt_text")]
    pub url: Option<String>,
    /// Issuer-page URL as sent by the newer endpoint variant.
    #[serde(rename = "NSURL", default, deserialize_with = "lenient::opt_text")]
    pub ns_url: Option<String>,
    /// Upstream keys not modeled above, preserved as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnnouncementRecord {
    /// Decode one `Table` row without letting an odd field reject it.
    ///
    /// Rows that do not fit the typed fields keep every key in [`Self::extra`].
    #[must_use]
    pub fn from_row(row: Map<String, Value>) -> Self {
        serde_json::from_value(Value::Object(row.clone())).unwrap_or_else(|_| Self {
            extra: row,
            ..Self::default()
        })
    }

    /// Issuer-page URL, preferring `URL` over `NSURL`. Blank values are skipped.
    #[must_use]
    pub fn issuer_url(&self) -> Option<&str> {
        [self.url.as_deref(), self.ns_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }

    /// Headline, or the news subject when the headline is blank.
    #[must_use]
    pub fn display_headline(&self) -> &str {
        if self.headline.trim().is_empty() {
            self.news_subject.as_deref().unwrap_or("")
        } else {
            &self.headline
        }
    }

    /// True only when the upstream flag was positively set.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.critical == Some(true)
    }

    /// Attachment filename, treating an empty name as no attachment.
    #[must_use]
    pub fn attachment(&self) -> Option<&str> {
        self.attachment_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether the announcement carries a viewable PDF.
    ///
    /// Uses the upstream flag when present, otherwise the attachment name.
    #[must_use]
    pub fn has_pdf(&self) -> bool {
        self.pdf_flag.unwrap_or_else(|| self.attachment().is_some())
    }

    /// Attachment size in whole KiB, rounded to nearest.
    #[must_use]
    pub fn attachment_kib(&self) -> Option<u64> {
        self.attachment_size.map(|b| (b + 512) / 1024)
    }

    /// Viewer URL for the attachment under `base`.
    #[must_use]
    pub fn pdf_url(&self, base: &str) -> Option<String> {
        crate::build_pdf_url(base, self.attachment()?)
    }

    /// Parse [`Self::timestamp`] as an exchange-local date-time.
    ///
    /// Accepts `T` or space separators, with or without fractional seconds.
    #[must_use]
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        const FORMATS: [&str; 4] = [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M:%S",
        ];
        let ts = self.timestamp.trim();
        FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(ts, f).ok())
    }
}
