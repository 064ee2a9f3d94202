use bsefeed::{FetchMode, SearchQuery};
use bsefeed_demos::common::{builder, scrip_from_args};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,bsefeed=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
        .try_init();

    let client = builder(FetchMode::Session).build()?;
    let query = SearchQuery::for_today(scrip_from_args());

    // Errors are data here: the spans show which step produced them.
    match client.fetch(&query).await {
        Ok(page) => tracing::info!(rows = page.len(), total = ?page.total_rows(), "fetched"),
        Err(e) => tracing::warn!(error = %e, "fetch failed"),
    }

    Ok(())
}
