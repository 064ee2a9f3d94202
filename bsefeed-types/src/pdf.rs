//! Attachment viewer URL derivation.

/// Viewer base path for live attachments on the public site.
pub const DEFAULT_PDF_BASE: &str = "https://www.bseindia.com/xml-data/corpfiling/AttachLive/";

/// Build the viewer URL for an attachment filename.
///
/// The filename is appended to `base`, with a `.pdf` suffix added unless it
/// already ends in `.pdf`. Returns `None` for an empty filename.
///
/// ```
/// use bsefeed_types::build_pdf_url;
///
/// let a = build_pdf_url("/pdf/", "ABC.pdf");
/// let b = build_pdf_url("/pdf/", "ABC");
/// assert_eq!(a.as_deref(), Some("/pdf/ABC.pdf"));
/// assert_eq!(a, b);
/// assert_eq!(build_pdf_url("/pdf/", ""), None);
/// ```
#[must_use]
pub fn build_pdf_url(base: &str, attachment: &str) -> Option<String> {
    if attachment.is_empty() {
        return None;
    }
    let suffix = if attachment.ends_with(".pdf") { "" } else { ".pdf" };
    Some(format!("{base}{attachment}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_base_is_absolute() {
        let url = build_pdf_url(DEFAULT_PDF_BASE, "x").unwrap();
        assert_eq!(
            url,
            "https://www.bseindia.com/xml-data/corpfiling/AttachLive/x.pdf"
        );
    }

    proptest! {
        #[test]
        fn suffix_is_added_exactly_once(name in "[A-Za-z0-9_-]{1,40}") {
            let bare = build_pdf_url("/pdf/", &name).unwrap();
            let with_ext = build_pdf_url("/pdf/", &format!("{name}.pdf")).unwrap();
            prop_assert_eq!(&bare, &with_ext);
            prop_assert!(bare.ends_with(".pdf"));
            prop_assert!(!bare.ends_with(".pdf.pdf"));
        }
    }
}
