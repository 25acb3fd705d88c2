//! Silver CSV loader
//!
//! Reads the six Silver extracts from a data directory into typed records.
//! Headers are the Silver column names; empty cells become nulls.

use crate::config::SourceFiles;
use crate::error::{GoldError, Result};
use crate::pipeline::SilverInputs;
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct SilverLoader {
    data_dir: PathBuf,
    sources: SourceFiles,
}

impl SilverLoader {
    pub fn new(data_dir: impl Into<PathBuf>, sources: SourceFiles) -> Self {
        Self {
            data_dir: data_dir.into(),
            sources,
        }
    }

    pub fn load(&self) -> Result<SilverInputs> {
        let inputs = SilverInputs {
            customers: self.read(&self.sources.customers)?,
            demographics: self.read(&self.sources.demographics)?,
            locations: self.read(&self.sources.locations)?,
            products: self.read(&self.sources.products)?,
            categories: self.read(&self.sources.categories)?,
            sales: self.read(&self.sources.sales)?,
        };

        info!(
            data_dir = %self.data_dir.display(),
            customers = inputs.customers.len(),
            products = inputs.products.len(),
            sales = inputs.sales.len(),
            "loaded silver inputs"
        );

        Ok(inputs)
    }

    fn read<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        read_csv(&self.data_dir.join(file_name))
    }
}

/// Deserialize every row of a headed CSV file
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)
        .map_err(|e| GoldError::Ingestion(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (line, record) in rdr.deserialize().enumerate() {
        let row: T = record.map_err(|e| {
            GoldError::Ingestion(format!("{} row {}: {}", path.display(), line + 1, e))
        })?;
        rows.push(row);
    }
    Ok(rows)
}
