//! Gold-layer star schema builder
//!
//! Projects cleansed Silver customer, product and sales records into
//! `dim_customers`, `dim_products` and `fact_sales`. All builders are pure
//! functions of their inputs; surrogate keys are positional and recomputed on
//! every build.

pub mod config;
pub mod customers;
pub mod error;
pub mod frames;
pub mod ingestion;
pub mod join;
pub mod keys;
pub mod pipeline;
pub mod products;
pub mod quality;
pub mod records;
pub mod sales;
pub mod validation;

pub use config::{GoldConfig, SourceFiles};
pub use customers::{CustomerDimensionBuilder, CustomerDimensionRow, UNKNOWN_GENDER};
pub use error::{GoldError, Result};
pub use join::ProjectionStats;
pub use keys::FIRST_SURROGATE_KEY;
pub use pipeline::{BuildReport, GoldPipeline, SilverInputs, StarSchema};
pub use products::{ProductDimensionBuilder, ProductDimensionRow};
pub use quality::QualityReport;
pub use records::{
    CustomerDemographics, CustomerLocation, CustomerRecord, ProductCategory, ProductRecord,
    SalesLineRecord,
};
pub use sales::{SalesFactBuilder, SalesFactRow};
