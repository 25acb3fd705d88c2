//! Precondition checks on Silver inputs
//!
//! The builders assume these hold and do not re-check them. Strict builds run
//! them up front so a violation fails the whole build instead of producing a
//! best-effort projection.

use crate::error::{GoldError, Result};
use crate::join::LookupIndex;
use crate::pipeline::SilverInputs;
use itertools::Itertools;
use tracing::debug;

/// Identity sources must carry unique business ids and business keys
pub fn check_identities(inputs: &SilverInputs) -> Result<()> {
    if let Some(id) = inputs.customers.iter().map(|c| c.customer_id).duplicates().next() {
        return Err(GoldError::precondition(
            "crm_cust_info",
            format!("duplicate customer id {}", id),
        ));
    }
    if let Some(key) = inputs
        .customers
        .iter()
        .map(|c| c.customer_key.as_str())
        .duplicates()
        .next()
    {
        return Err(GoldError::precondition(
            "crm_cust_info",
            format!("duplicate customer key '{}'", key),
        ));
    }

    let current = inputs.products.iter().filter(|p| p.is_current());
    if let Some(key) = current.map(|p| p.product_key.as_str()).duplicates().next() {
        return Err(GoldError::precondition(
            "crm_prd_info",
            format!("more than one current version of product '{}'", key),
        ));
    }

    Ok(())
}

/// Enrichment sources must carry at most one row per join key
pub fn check_enrichment(inputs: &SilverInputs) -> Result<()> {
    LookupIndex::build("customer_demographics", &inputs.demographics, |d| {
        d.customer_key.as_str()
    })
    .ensure_unambiguous()?;
    LookupIndex::build("customer_location", &inputs.locations, |l| l.customer_key.as_str())
        .ensure_unambiguous()?;
    LookupIndex::build("product_category", &inputs.categories, |c| c.category_id.as_str())
        .ensure_unambiguous()?;
    Ok(())
}

pub fn validate_inputs(inputs: &SilverInputs) -> Result<()> {
    check_identities(inputs)?;
    check_enrichment(inputs)?;
    debug!("silver inputs passed precondition checks");
    Ok(())
}
