//! Country catalog scraper.
//!
//! Walks the listing pages of the catalog, visits every country detail page,
//! resolves its neighbours and writes everything into a CSV file.

mod error;
mod macros;
mod parse;
pub mod process;
pub mod record;
mod request;

use std::path::PathBuf;

pub use error::{Error, Result};
pub use parse::extract_field;
pub use record::{Dataset, Record};
pub use request::fetch_html;

const BASE_URL: &str = "http://127.0.0.1:8000/places/default/index";
const FILE_PATH: &str = "countries_data.csv";

pub const COUNTRY_ROW: &str = "places_country__row";
pub const CURRENCY_NAME_ROW: &str = "places_currency_name__row";
pub const CONTINENT_ROW: &str = "places_continent__row";
pub const NEIGHBOURS_ROW: &str = "places_neighbours__row";
/// Class of the `<td>` holding the value of a row.
const VALUE_CELL_CLASS: &str = "w2p_fw";

const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";
const SEPARATOR_WIDTH: usize = 50;

/// Where to start crawling and where to put the result.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub output_path: PathBuf,
    /// When false only the base listing page is processed.
    pub paginate: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.into(),
            output_path: PathBuf::from(FILE_PATH),
            paginate: true,
        }
    }
}
