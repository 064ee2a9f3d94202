use bsefeed::{FetchMode, SearchQuery};
use bsefeed_demos::common::{builder, scrip_from_args};
use chrono::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = builder(FetchMode::Session).build()?;

    // Last seven exchange days, newest page first.
    let to = bsefeed::exchange_today();
    let from = to - Duration::days(7);
    let query = SearchQuery::new(scrip_from_args(), from, to);

    let page = client.fetch(&query).await?;
    for rec in page.records.iter().filter(|r| r.has_pdf()) {
        let size = rec
            .attachment_kib()
            .map_or_else(|| "?".to_string(), |k| format!("{k} KiB"));
        let link = rec
            .attachment()
            .and_then(|a| client.pdf_url(a))
            .unwrap_or_default();
        println!("{} [{size}]\n  {link}", rec.display_headline());
    }

    Ok(())
}
