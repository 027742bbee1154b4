use chrono::Local;
use reqwest::Client;
use url::Url;

use crate::parse::{parse_country, parse_country_name, parse_listing, LinkPatterns};
use crate::request::fetch_html;
use crate::{
    info_time, warn_time, Dataset, Record, Result, ScrapeConfig, SEPARATOR_WIDTH,
};

/// Crawls the whole catalog and writes it out as CSV.
/// Returns the number of data rows written.
pub async fn process_site(config: &ScrapeConfig) -> Result<usize> {
    let client = Client::new();

    let data = crawl(&client, config).await?;

    let local_now = Local::now();
    data.write_csv(&config.output_path).await?;
    info_time!(
        local_now,
        "Wrote the results to file: {}",
        config.output_path.display()
    );

    Ok(data.len())
}

/// Follows the listing pages starting at `config.base_url` until a page has no
/// "next" link (or can't be fetched) and collects a record per country page.
/// There is no page limit, a cyclic chain of "next" links never ends.
pub async fn crawl(client: &Client, config: &ScrapeConfig) -> Result<Dataset> {
    let start_time = Local::now();
    let base_url = Url::parse(&config.base_url)?;
    let patterns = LinkPatterns::new()?;
    let mut data = Dataset::new();

    info_time!("Started scraping {}", base_url);

    let mut next = Some(base_url.clone());
    let mut pages = 0usize;
    while let Some(url) = next {
        next = process_page(client, &url, &base_url, &patterns, &mut data).await;
        pages += 1;
        if !config.paginate {
            break;
        }
    }

    info_time!(
        start_time,
        "Finished {} listing pages, {} countries.",
        pages,
        data.len()
    );
    Ok(data)
}

/// Scrapes every detail link of a single listing page into `data`.
/// Returns the absolute URL of the next listing page, if there is one.
///
/// A listing page that can't be fetched or parsed ends the crawl, a detail page
/// that can't be fetched or parsed is skipped without a record.
pub(crate) async fn process_page(
    client: &Client,
    url: &Url,
    base_url: &Url,
    patterns: &LinkPatterns,
    data: &mut Dataset,
) -> Option<Url> {
    let html = fetch_html(client, url).await?;
    let listing = skip_on_error(parse_listing(html, patterns).await, url)?;

    for link in listing.detail_links {
        println!("\nProcessing country: {}", link.text);

        let detail_url = match base_url.join(&link.href) {
            Ok(detail_url) => detail_url,
            Err(e) => {
                warn_time!("Skipping detail link {:?}: {e}", link.href);
                continue;
            }
        };

        let page = match fetch_html(client, &detail_url).await {
            Some(country_html) => skip_on_error(parse_country(country_html).await, &detail_url),
            None => None,
        };
        if let Some(page) = page {
            let neighbours = resolve_neighbours(client, &page.neighbour_hrefs, base_url).await;
            let record =
                Record::captured_now(page.country, page.currency_name, page.continent, neighbours);

            println!("Extracted data for: {}", record.country);
            println!("Currency: {}", record.currency_name);
            println!("Continent: {}", record.continent);
            println!("Neighbours: {}", record.neighbours);
            data.push(record);
        }

        println!("{}", "-".repeat(SEPARATOR_WIDTH));
    }

    listing
        .next_href
        .and_then(|href| match base_url.join(&href) {
            Ok(next) => Some(next),
            Err(e) => {
                warn_time!("Couldn't resolve next page {href:?}: {e}");
                None
            }
        })
}

/// Fetches every neighbour page and joins their country names with `", "`, in link order.
/// Links that fail to resolve or fetch, and pages with no country name, are left out.
/// Every call goes to the network, nothing is cached.
pub async fn resolve_neighbours(
    client: &Client,
    hrefs: &[String],
    base_url: &Url,
) -> String {
    let mut names = Vec::with_capacity(hrefs.len());
    for href in hrefs {
        let Ok(neighbour_url) = base_url.join(href) else {
            warn_time!("Skipping neighbour link {href:?}");
            continue;
        };
        let Some(html) = fetch_html(client, &neighbour_url).await else {
            continue;
        };
        let Some(name) = skip_on_error(parse_country_name(html).await, &neighbour_url) else {
            continue;
        };
        if !name.is_empty() {
            names.push(name);
        }
    }
    names.join(", ")
}

/// Logs a page that couldn't be parsed and drops it, like a failed fetch.
fn skip_on_error<T>(parsed: Result<T>, url: &Url) -> Option<T> {
    match parsed {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn_time!("Skipping {url}, couldn't parse it: {e}");
            None
        }
    }
}
