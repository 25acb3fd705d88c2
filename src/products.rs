//! Product dimension
//!
//! Only the current version of each product (open-ended validity) reaches the
//! dimension. Category data from ERP is optional decoration.

use crate::join::{left_join, LookupIndex, ProjectionStats};
use crate::keys::assign_surrogate_keys;
use crate::records::{ProductCategory, ProductRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One row of `dim_products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDimensionRow {
    pub product_key: i64,
    pub product_id: i64,
    pub product_number: String,
    pub product_name: Option<String>,
    pub category_id: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub maintenance: Option<String>,
    pub cost: Option<i64>,
    pub product_line: Option<String>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Default)]
pub struct ProductDimensionBuilder;

impl ProductDimensionBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the product dimension from the current product versions.
    ///
    /// Keys are ordered by (start date, product key); a missing start date
    /// sorts first.
    pub fn build(
        &self,
        products: &[ProductRecord],
        categories: &[ProductCategory],
    ) -> Vec<ProductDimensionRow> {
        self.build_with_stats(products, categories).0
    }

    /// [`build`](Self::build), also returning the join counts of this projection
    pub fn build_with_stats(
        &self,
        products: &[ProductRecord],
        categories: &[ProductCategory],
    ) -> (Vec<ProductDimensionRow>, ProjectionStats) {
        let categories_by_id =
            LookupIndex::build("product_category", categories, |c| c.category_id.as_str());

        let current = products.iter().filter(|p| p.is_current());
        let joined = left_join(current, &categories_by_id, |p| p.category_id.as_deref());
        let without_category = joined.unmatched;
        let mut stats = ProjectionStats::new(products.len(), joined.pairs.len());
        stats.record(&categories_by_id, &joined);

        let keyed = assign_surrogate_keys(joined.pairs, |a, b| {
            (a.0.start_date, &a.0.product_key).cmp(&(b.0.start_date, &b.0.product_key))
        });

        let rows: Vec<ProductDimensionRow> = keyed
            .into_iter()
            .map(|(product_key, (product, category))| ProductDimensionRow {
                product_key,
                product_id: product.product_id,
                product_number: product.product_key.clone(),
                product_name: product.name.clone(),
                category_id: product.category_id.clone(),
                category: category.and_then(|c| c.category.clone()),
                subcategory: category.and_then(|c| c.subcategory.clone()),
                maintenance: category.and_then(|c| c.maintenance.clone()),
                cost: product.cost,
                product_line: product.product_line.clone(),
                start_date: product.start_date,
            })
            .collect();

        info!(
            versions = products.len(),
            historical_dropped = products.len() - rows.len(),
            without_category,
            rows = rows.len(),
            "built product dimension"
        );

        (rows, stats)
    }
}
