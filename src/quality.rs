//! Gold-layer quality checks
//!
//! Run against a finished [`StarSchema`]: surrogate keys per dimension and
//! fact-to-dimension connectivity.

use crate::keys::is_contiguous;
use crate::pipeline::StarSchema;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use tracing::warn;

/// Surrogate and business key health of one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyCheck {
    pub dimension: String,
    pub rows: usize,
    pub unique_keys: bool,
    pub contiguous_keys: bool,
    /// Business keys carried by more than one dimension row
    pub duplicate_business_keys: usize,
}

impl KeyCheck {
    fn evaluate<B, I>(dimension: &str, keys: Vec<i64>, business_keys: I) -> Self
    where
        B: Eq + Hash + Clone,
        I: Iterator<Item = B>,
    {
        let unique_keys = keys.iter().all_unique();
        Self {
            dimension: dimension.to_string(),
            rows: keys.len(),
            unique_keys,
            contiguous_keys: is_contiguous(keys),
            duplicate_business_keys: business_keys.duplicates().count(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.unique_keys && self.contiguous_keys && self.duplicate_business_keys == 0
    }
}

/// Fact rows whose dimension keys are missing or point nowhere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactIntegrity {
    pub rows: usize,
    pub missing_product_key: usize,
    pub missing_customer_key: usize,
    pub dangling_product_key: usize,
    pub dangling_customer_key: usize,
}

impl FactIntegrity {
    pub fn is_clean(&self) -> bool {
        self.missing_product_key == 0
            && self.missing_customer_key == 0
            && self.dangling_product_key == 0
            && self.dangling_customer_key == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub customers: KeyCheck,
    pub products: KeyCheck,
    pub sales: FactIntegrity,
}

impl QualityReport {
    pub fn evaluate(schema: &StarSchema) -> Self {
        let customers = KeyCheck::evaluate(
            "dim_customers",
            schema.customers.iter().map(|c| c.customer_key).collect(),
            schema.customers.iter().map(|c| c.customer_id),
        );
        let products = KeyCheck::evaluate(
            "dim_products",
            schema.products.iter().map(|p| p.product_key).collect(),
            schema.products.iter().map(|p| p.product_number.as_str()),
        );

        let product_keys: HashSet<i64> = schema.products.iter().map(|p| p.product_key).collect();
        let customer_keys: HashSet<i64> = schema.customers.iter().map(|c| c.customer_key).collect();

        let sales = FactIntegrity {
            rows: schema.sales.len(),
            missing_product_key: schema.sales.iter().filter(|f| f.product_key.is_none()).count(),
            missing_customer_key: schema.sales.iter().filter(|f| f.customer_key.is_none()).count(),
            dangling_product_key: schema
                .sales
                .iter()
                .filter_map(|f| f.product_key)
                .filter(|k| !product_keys.contains(k))
                .count(),
            dangling_customer_key: schema
                .sales
                .iter()
                .filter_map(|f| f.customer_key)
                .filter(|k| !customer_keys.contains(k))
                .count(),
        };

        let report = Self {
            customers,
            products,
            sales,
        };
        if !report.is_clean() {
            warn!(
                facts_without_product = report.sales.missing_product_key,
                facts_without_customer = report.sales.missing_customer_key,
                "gold quality checks found issues"
            );
        }
        report
    }

    pub fn is_clean(&self) -> bool {
        self.customers.is_clean() && self.products.is_clean() && self.sales.is_clean()
    }
}
