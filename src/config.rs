//! Build configuration, loaded from a JSON file.

use crate::customers::UNKNOWN_GENDER;
use crate::error::{GoldError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldConfig {
    /// Gender code meaning "not known"
    pub unknown_gender: String,
    /// Validate inputs first and fail instead of resolving ambiguities best-effort
    pub strict: bool,
    /// Build the two dimensions concurrently
    pub parallel: bool,
    pub sources: SourceFiles,
}

impl Default for GoldConfig {
    fn default() -> Self {
        Self {
            unknown_gender: UNKNOWN_GENDER.to_string(),
            strict: false,
            parallel: true,
            sources: SourceFiles::default(),
        }
    }
}

/// Silver extract file names, relative to the data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    pub customers: String,
    pub demographics: String,
    pub locations: String,
    pub products: String,
    pub categories: String,
    pub sales: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            customers: "crm_cust_info.csv".to_string(),
            demographics: "erp_cust_az12.csv".to_string(),
            locations: "erp_loc_a101.csv".to_string(),
            products: "crm_prd_info.csv".to_string(),
            categories: "erp_px_cat_g1v2.csv".to_string(),
            sales: "crm_sales_details.csv".to_string(),
        }
    }
}

impl SourceFiles {
    /// (logical name, file name) for every source
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("customers", self.customers.as_str()),
            ("demographics", self.demographics.as_str()),
            ("locations", self.locations.as_str()),
            ("products", self.products.as_str()),
            ("categories", self.categories.as_str()),
            ("sales", self.sales.as_str()),
        ]
    }
}

impl GoldConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| GoldError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: GoldConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.unknown_gender.trim().is_empty() {
            return Err(GoldError::Config("unknown_gender must not be empty".to_string()));
        }
        for (name, file) in self.sources.entries() {
            if file.trim().is_empty() {
                return Err(GoldError::Config(format!("source file for {} is empty", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"strict": true, "sources": {{"sales": "sales.csv"}}}}"#).unwrap();

        let config = GoldConfig::load(file.path()).unwrap();

        assert!(config.strict);
        assert!(config.parallel);
        assert_eq!(config.unknown_gender, "n/a");
        assert_eq!(config.sources.sales, "sales.csv");
        assert_eq!(config.sources.customers, "crm_cust_info.csv");
    }

    #[test]
    fn test_empty_sentinel_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"unknown_gender": " "}}"#).unwrap();

        assert!(matches!(GoldConfig::load(file.path()), Err(GoldError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = GoldConfig::load("/nonexistent/gold.json");
        assert!(matches!(result, Err(GoldError::Config(_))));
    }
}
