use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::{Error, Result, TIMESTAMP_FMT};

/// Header row of the output file.
pub const HEADER: [&str; 5] = [
    "country",
    "currency_name",
    "continent",
    "neighbours",
    "timestamp",
];

/// One visited country page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub country: String,
    pub currency_name: String,
    pub continent: String,
    /// Neighbour names joined with `", "`.
    pub neighbours: String,
    /// Local time at which the page was captured.
    pub timestamp: String,
}

impl Record {
    /// Builds a record stamped with the current local time.
    pub fn captured_now(
        country: String,
        currency_name: String,
        continent: String,
        neighbours: String,
    ) -> Self {
        Self {
            country,
            currency_name,
            continent,
            neighbours,
            timestamp: Local::now().format(TIMESTAMP_FMT).to_string(),
        }
    }
}

/// Records in the order they were scraped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Serializes the header followed by every record.
    /// The header is written by hand so that an empty dataset still gets one.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        wtr.write_record(HEADER)?;
        for record in &self.records {
            wtr.serialize(record)?;
        }
        wtr.into_inner().map_err(|e| Error::Io(e.into_error()))
    }

    pub async fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_csv()?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}
