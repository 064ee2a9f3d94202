use bsefeed::{FetchMode, SearchQuery};
use bsefeed_demos::common::{builder, scrip_from_args};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Direct mode skips session priming and trusts the body to be JSON.
    let client = builder(FetchMode::Direct).build()?;
    let query = SearchQuery::for_today(scrip_from_args());

    match client.fetch(&query).await {
        Ok(page) => println!("{page:#?}"),
        Err(e) if e.is_transport() => eprintln!("transport failure: {e}"),
        Err(e) => eprintln!("{e}"),
    }

    Ok(())
}
