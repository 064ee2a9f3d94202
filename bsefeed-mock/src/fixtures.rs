//! Canned exchange responses covering every shape the endpoint is known to return.

use bsefeed::WireResponse;
use serde_json::{Value, json};

/// Two announcement rows with the mixed field encodings seen in the wild.
#[must_use]
pub fn sample_rows() -> Value {
    json!([
        {
            "NEWSID": "7b1e2f0c-4c5d-4c9e-9a51-0f5f1b7a9d10",
            "SCRIP_CD": 543985,
            "DT_TM": "2024-05-10T18:34:12.77",
            "SLONGNAME": "Acme Industries Ltd",
            "HEADLINE": "Outcome of Board Meeting held on May 10, 2024",
            "NEWSSUB": "Acme Industries Ltd - 543985 - Board Meeting Outcome",
            "SUBCATNAME": "Outcome of Board Meeting",
            "CRITICALNEWS": 1,
            "ATTACHMENTNAME": "7b1e2f0c-4c5d-4c9e-9a51-0f5f1b7a9d10.pdf",
            "Fld_Attachsize": 245_760,
            "PDFFLAG": 0,
            "NSURL": "https://www.bseindia.com/stock-share-price/acme-industries-ltd/acme/543985/"
        },
        {
            "NEWSID": "1d9a7c52-77a3-4f0e-b1b4-3f2b0c6e8e21",
            "SCRIP_CD": "543985",
            "DT_TM": "2024-05-09T11:02:45",
            "SLONGNAME": "Acme Industries Ltd",
            "HEADLINE": "",
            "NEWSSUB": "Acme Industries Ltd - 543985 - Trading Window Closure",
            "SUBCATNAME": "Trading Window",
            "CRITICALNEWS": "0",
            "ATTACHMENTNAME": null,
            "Fld_Attachsize": null,
            "PDFFLAG": "1",
            "NSURL": "https://www.bseindia.com/stock-share-price/acme-industries-ltd/acme/543985/"
        }
    ])
}

/// The provider object for [`sample_rows`] with a two-row count.
#[must_use]
pub fn payload() -> Value {
    json!({ "Table": sample_rows(), "Table1": [{ "ROWCNT": "2" }] })
}

/// [`payload`] serialized compactly.
#[must_use]
pub fn payload_json() -> String {
    payload().to_string()
}

/// Plain JSON answer.
#[must_use]
pub fn json_response() -> WireResponse {
    WireResponse::ok("application/json; charset=utf-8", payload_json())
}

/// JSON answer whose metadata table is empty.
#[must_use]
pub fn empty_meta_response() -> WireResponse {
    let body = json!({ "Table": [], "Table1": [] }).to_string();
    WireResponse::ok("application/json", body)
}

/// HTML page carrying the payload in a script variable assignment.
#[must_use]
pub fn script_assignment_response() -> WireResponse {
    let body = format!(
        "<!DOCTYPE html>\n<html><head><title>Corporate Announcements</title>\n\
         <style>body {{ font-family: Arial; }}</style></head>\n<body>\n\
         <div id=\"ann\"></div>\n<script type=\"text/javascript\">\n\
         var annData = {};\nrenderAnnouncements(annData);\n</script>\n</body></html>",
        payload_json()
    );
    WireResponse::ok("text/html; charset=utf-8", body)
}

/// HTML page carrying the payload as a bare object inside markup.
#[must_use]
pub fn inline_object_response() -> WireResponse {
    let body = format!(
        "<html><body><pre id=\"data\">{}</pre></body></html>",
        serde_json::to_string_pretty(&payload()).unwrap_or_default()
    );
    WireResponse::ok("text/html", body)
}

/// Long HTML failure page with no JSON anywhere.
#[must_use]
pub fn error_page_response() -> WireResponse {
    let filler = "<p>The requested URL was rejected. Please consult with your administrator.</p>\n"
        .repeat(12);
    let body = format!(
        "<html><head><title>Request Rejected</title></head><body>\n{filler}\
         <p>Your support ID is: 1234567890123456789</p></body></html>"
    );
    WireResponse {
        status: 200,
        content_type: Some("text/html".to_string()),
        location: None,
        body,
    }
}

/// Redirect to `location` with an empty body, as sent when the session is missing.
#[must_use]
pub fn redirect_response(location: &str) -> WireResponse {
    WireResponse {
        status: 302,
        content_type: Some("text/html".to_string()),
        location: Some(location.to_string()),
        body: String::new(),
    }
}

/// Plain HTML answer for the priming page.
#[must_use]
pub fn priming_page_response() -> WireResponse {
    WireResponse::ok(
        "text/html",
        "<html><head><title>Corporate Announcements</title></head><body></body></html>",
    )
}
