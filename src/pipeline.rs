//! Silver → Gold build
//!
//! Both dimensions are independent of each other; the fact needs both. The
//! dimension builds run on the rayon pool when `parallel` is set and join
//! before the fact build starts.

use crate::config::GoldConfig;
use crate::customers::{CustomerDimensionBuilder, CustomerDimensionRow};
use crate::error::Result;
use crate::join::ProjectionStats;
use crate::products::{ProductDimensionBuilder, ProductDimensionRow};
use crate::records::{
    CustomerDemographics, CustomerLocation, CustomerRecord, ProductCategory, ProductRecord,
    SalesLineRecord,
};
use crate::sales::{SalesFactBuilder, SalesFactRow};
use crate::validation::validate_inputs;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// The six Silver record sets, fully materialized
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SilverInputs {
    pub customers: Vec<CustomerRecord>,
    pub demographics: Vec<CustomerDemographics>,
    pub locations: Vec<CustomerLocation>,
    pub products: Vec<ProductRecord>,
    pub categories: Vec<ProductCategory>,
    pub sales: Vec<SalesLineRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StarSchema {
    pub customers: Vec<CustomerDimensionRow>,
    pub products: Vec<ProductDimensionRow>,
    pub sales: Vec<SalesFactRow>,
}

/// Join counts per projection of one build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub customers: ProjectionStats,
    pub products: ProjectionStats,
    pub sales: ProjectionStats,
}

pub struct GoldPipeline {
    config: GoldConfig,
    customers: CustomerDimensionBuilder,
    products: ProductDimensionBuilder,
    sales: SalesFactBuilder,
}

impl Default for GoldPipeline {
    fn default() -> Self {
        Self::new(GoldConfig::default())
    }
}

impl GoldPipeline {
    pub fn new(config: GoldConfig) -> Self {
        let customers = CustomerDimensionBuilder::new(config.unknown_gender.clone());
        Self {
            config,
            customers,
            products: ProductDimensionBuilder::new(),
            sales: SalesFactBuilder::new(),
        }
    }

    pub fn config(&self) -> &GoldConfig {
        &self.config
    }

    /// Build the whole star schema. Either every projection is returned or
    /// the build fails; only strict mode can fail.
    pub fn build(&self, inputs: &SilverInputs) -> Result<StarSchema> {
        self.build_with_report(inputs).map(|(schema, _)| schema)
    }

    /// [`build`](Self::build), also returning the row and lookup counts of
    /// every projection
    pub fn build_with_report(&self, inputs: &SilverInputs) -> Result<(StarSchema, BuildReport)> {
        let started = Instant::now();

        if self.config.strict {
            validate_inputs(inputs)?;
        }

        let ((customers, customer_stats), (products, product_stats)) = if self.config.parallel {
            rayon::join(
                || self.build_customers(inputs),
                || self.build_products(inputs),
            )
        } else {
            (self.build_customers(inputs), self.build_products(inputs))
        };

        let (sales, sales_stats) = self
            .sales
            .build_with_stats(&inputs.sales, &products, &customers);

        info!(
            customers = customers.len(),
            products = products.len(),
            sales = sales.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "star schema built"
        );

        let schema = StarSchema {
            customers,
            products,
            sales,
        };
        let report = BuildReport {
            customers: customer_stats,
            products: product_stats,
            sales: sales_stats,
        };
        Ok((schema, report))
    }

    fn build_customers(
        &self,
        inputs: &SilverInputs,
    ) -> (Vec<CustomerDimensionRow>, ProjectionStats) {
        self.customers
            .build_with_stats(&inputs.customers, &inputs.demographics, &inputs.locations)
    }

    fn build_products(&self, inputs: &SilverInputs) -> (Vec<ProductDimensionRow>, ProjectionStats) {
        self.products
            .build_with_stats(&inputs.products, &inputs.categories)
    }
}
