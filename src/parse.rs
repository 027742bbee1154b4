use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tokio::task::spawn_blocking;

use crate::{
    Error, Result, CONTINENT_ROW, COUNTRY_ROW, CURRENCY_NAME_ROW, NEIGHBOURS_ROW,
    VALUE_CELL_CLASS,
};

/// An anchor on a listing page that points to a country page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DetailLink {
    pub href: String,
    pub text: String,
}

/// Everything the crawler needs from a listing page.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ListingPage {
    pub detail_links: Vec<DetailLink>,
    pub next_href: Option<String>,
}

/// Fields of a country page. Neighbours are still unresolved hrefs at this point.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CountryPage {
    pub country: String,
    pub currency_name: String,
    pub continent: String,
    pub neighbour_hrefs: Vec<String>,
}

/// Patterns that pick detail links (by href) and the next-page link (by text) out of a
/// listing page. Built once per crawl.
#[derive(Debug, Clone)]
pub(crate) struct LinkPatterns {
    view: Regex,
    next: Regex,
}

impl LinkPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            view: Regex::new(r"(?i)view")?,
            next: Regex::new(r"(?i)\bnext\b")?,
        })
    }
}

// `Html` isn't `Send`, so every document is built and dropped inside a blocking task
// and only owned data comes back out.

pub(crate) async fn parse_listing(html: String, patterns: &LinkPatterns) -> Result<ListingPage> {
    let patterns = patterns.clone();
    spawn_blocking(move || listing_from_doc(&Html::parse_document(&html), &patterns)).await?
}

pub(crate) async fn parse_country(html: String) -> Result<CountryPage> {
    spawn_blocking(move || country_from_doc(&Html::parse_document(&html))).await?
}

/// Only the country name, used for neighbour pages.
pub(crate) async fn parse_country_name(html: String) -> Result<String> {
    let name =
        spawn_blocking(move || extract_field(&Html::parse_document(&html), COUNTRY_ROW)).await?;
    Ok(name)
}

/// Collects the detail links (href matching `view`, any case) in document order
/// and the first link whose text contains the word `next`, any case.
fn listing_from_doc(doc: &Html, patterns: &LinkPatterns) -> Result<ListingPage> {
    let link_selector = create_selector("a[href]")?;

    let mut page = ListingPage::default();
    for link in doc.select(&link_selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let text = element_text(link);

        if patterns.view.is_match(href) {
            page.detail_links.push(DetailLink {
                href: href.to_string(),
                text: text.clone(),
            });
        }
        if page.next_href.is_none() && patterns.next.is_match(&text) {
            page.next_href = Some(href.to_string());
        }
    }
    Ok(page)
}

fn country_from_doc(doc: &Html) -> Result<CountryPage> {
    Ok(CountryPage {
        country: extract_field(doc, COUNTRY_ROW),
        currency_name: extract_field(doc, CURRENCY_NAME_ROW),
        continent: extract_field(doc, CONTINENT_ROW),
        neighbour_hrefs: neighbour_links(doc)?,
    })
}

/// Returns the trimmed text of the value cell in the row `row_id`.
/// A missing row or cell gives an empty string.
pub fn extract_field(doc: &Html, row_id: &str) -> String {
    let (Ok(row_selector), Ok(cell_selector)) = (
        create_selector(&format!(r#"tr[id="{row_id}"]"#)),
        create_selector(&format!("td.{VALUE_CELL_CLASS}")),
    ) else {
        return String::new();
    };

    doc.select(&row_selector)
        .next()
        .and_then(|row| row.select(&cell_selector).next())
        .map(element_text)
        .unwrap_or_default()
}

/// Hrefs of every link inside the neighbours row, in document order.
fn neighbour_links(doc: &Html) -> Result<Vec<String>> {
    let selector = create_selector(&format!(r#"tr[id="{NEIGHBOURS_ROW}"] a[href]"#))?;
    let hrefs = doc
        .select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .map(String::from)
        .collect();
    Ok(hrefs)
}

#[inline]
fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::InvalidSelector(sel_str.into()))
}
