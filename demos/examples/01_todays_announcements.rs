use bsefeed::{FetchMode, SearchQuery, SearchScope};
use bsefeed_demos::common::{builder, scrip_from_args};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = builder(FetchMode::Session).build()?;
    let query = SearchQuery::for_today(scrip_from_args()).scope(SearchScope::All);

    println!("Announcements for {} on {}...", query.scrip, query.from);
    let page = match client.fetch(&query).await {
        Ok(page) => page,
        Err(e) => {
            eprintln!("{e}");
            return Ok(());
        }
    };

    for rec in &page.records {
        let marker = if rec.is_critical() { "!" } else { " " };
        println!(
            "{marker} {} | {} | {}",
            rec.timestamp,
            rec.subcategory,
            rec.display_headline()
        );
    }
    println!("{} shown, {} total", page.len(), page.total_rows_or_len());

    Ok(())
}
