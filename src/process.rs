use std::collections::HashSet;

use chrono::Local;
use reqwest::Client;

use crate::export::write_deck;
use crate::parse::parse_page;
use crate::record::Example;
use crate::request::{client, fetch_page};
use crate::{info_time, Error, Options, Result};

/// Scrapes the whole guide from the configured seed address and writes the
/// resulting deck. Strictly sequential: each page is fetched and fully
/// parsed before the next is requested, and the deck is written once, after
/// the final page.
pub async fn run(options: &Options) -> Result<()> {
    let client = client()?;
    info_time!("Scraping the guide from {}", options.seed_url);

    let scrape_start = Local::now();
    let examples = scrape_guide(&client, &options.seed_url).await?;
    info_time!(scrape_start, "Collected {} records in total", examples.len());

    let write_start = Local::now();
    write_deck(&options.output_path, &examples).await?;
    info_time!(
        write_start,
        "Wrote the deck to {}",
        options.output_path.display()
    );

    Ok(())
}

/// Follows next-page links from `seed` until a page links no further,
/// accumulating records in page order. The link graph is untrusted input:
/// an address seen twice fails the run instead of looping forever.
async fn scrape_guide(client: &Client, seed: &str) -> Result<Vec<Example>> {
    let mut examples = Vec::new();
    let mut visited = HashSet::new();
    let mut address = Some(seed.to_string());

    while let Some(url) = address {
        if !visited.insert(url.clone()) {
            return Err(Error::PaginationCycle(url));
        }

        let page_start = Local::now();
        let html = fetch_page(client, &url).await?;
        let page = parse_page(&html, &url)?;
        info_time!(page_start, "{url}: found {} records", page.examples.len());

        examples.extend(page.examples);
        address = page.next_url;
    }

    Ok(examples)
}
