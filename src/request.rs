use reqwest::Client;
use url::Url;

use crate::{warn_time, Result};

/// Fetches a page and hands back its HTML.
/// Any failure (connection, timeout, non-2xx status, undecodable body) is logged
/// and turned into `None`, so the caller can simply skip the URL.
pub async fn fetch_html(client: &Client, url: &Url) -> Option<String> {
    match request_page_html(client, url).await {
        Ok(html) => Some(html),
        Err(e) => {
            warn_time!("Couldn't fetch {url}: {e}");
            None
        }
    }
}

/// Requests a page and returns a `Result<String>` containing the HTML.
async fn request_page_html(client: &Client, url: &Url) -> Result<String> {
    let res = client.get(url.clone()).send().await?.error_for_status()?;
    let html = res.text().await?;
    Ok(html)
}
