//! Customer dimension
//!
//! CRM customer identities are the primary input. ERP demographics and ERP
//! locations only decorate them: a missing match leaves the corresponding
//! attributes null and never removes the customer.

use crate::join::{left_join, LookupIndex, ProjectionStats};
use crate::keys::assign_surrogate_keys;
use crate::records::{CustomerDemographics, CustomerLocation, CustomerRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Gender code used when no source knows the customer's gender. Codes are
/// matched against it ignoring ASCII case.
pub const UNKNOWN_GENDER: &str = "n/a";

/// One row of `dim_customers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDimensionRow {
    pub customer_key: i64,
    pub customer_id: i64,
    pub customer_number: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub marital_status: Option<String>,
    pub gender: String,
    pub birthdate: Option<NaiveDate>,
    pub create_date: Option<NaiveDate>,
}

pub struct CustomerDimensionBuilder {
    unknown_gender: String,
}

impl Default for CustomerDimensionBuilder {
    fn default() -> Self {
        Self::new(UNKNOWN_GENDER)
    }
}

impl CustomerDimensionBuilder {
    pub fn new(unknown_gender: impl Into<String>) -> Self {
        Self {
            unknown_gender: unknown_gender.into(),
        }
    }

    pub fn unknown_gender(&self) -> &str {
        &self.unknown_gender
    }

    /// CRM is the master for gender; ERP is only consulted when CRM has no
    /// usable value. A null code and the sentinel (in any case) are treated alike.
    pub fn reconcile_gender(&self, crm: Option<&str>, erp: Option<&str>) -> String {
        self.known_gender(crm)
            .or_else(|| self.known_gender(erp))
            .unwrap_or(self.unknown_gender.as_str())
            .to_string()
    }

    fn known_gender<'s>(&self, code: Option<&'s str>) -> Option<&'s str> {
        code.filter(|c| !c.eq_ignore_ascii_case(&self.unknown_gender))
    }

    /// Build the customer dimension.
    ///
    /// Customer keys must be unique in `identities`; this is not re-checked
    /// here. Duplicate keys in the enrichment inputs resolve to the first row.
    pub fn build(
        &self,
        identities: &[CustomerRecord],
        demographics: &[CustomerDemographics],
        locations: &[CustomerLocation],
    ) -> Vec<CustomerDimensionRow> {
        self.build_with_stats(identities, demographics, locations).0
    }

    /// [`build`](Self::build), also returning the join counts of this projection
    pub fn build_with_stats(
        &self,
        identities: &[CustomerRecord],
        demographics: &[CustomerDemographics],
        locations: &[CustomerLocation],
    ) -> (Vec<CustomerDimensionRow>, ProjectionStats) {
        let demographics_by_key = LookupIndex::build("customer_demographics", demographics, |d| {
            d.customer_key.as_str()
        });
        let locations_by_key =
            LookupIndex::build("customer_location", locations, |l| l.customer_key.as_str());

        let with_demographics = left_join(identities, &demographics_by_key, |c| {
            Some(c.customer_key.as_str())
        });
        let with_location = left_join(identities, &locations_by_key, |c| {
            Some(c.customer_key.as_str())
        });

        let mut stats = ProjectionStats::new(identities.len(), identities.len());
        stats.record(&demographics_by_key, &with_demographics);
        stats.record(&locations_by_key, &with_location);

        let joined: Vec<_> = with_demographics
            .pairs
            .into_iter()
            .zip(with_location.pairs)
            .map(|((identity, demo), (_, location))| (identity, demo, location))
            .collect();

        let keyed = assign_surrogate_keys(joined, |a, b| a.0.customer_id.cmp(&b.0.customer_id));

        let rows: Vec<CustomerDimensionRow> = keyed
            .into_iter()
            .map(|(customer_key, (identity, demo, location))| CustomerDimensionRow {
                customer_key,
                customer_id: identity.customer_id,
                customer_number: identity.customer_key.clone(),
                first_name: identity.first_name.clone(),
                last_name: identity.last_name.clone(),
                country: location.and_then(|l| l.country.clone()),
                marital_status: identity.marital_status.clone(),
                gender: self.reconcile_gender(
                    identity.gender.as_deref(),
                    demo.and_then(|d| d.gender.as_deref()),
                ),
                birthdate: demo.and_then(|d| d.birthdate),
                create_date: identity.create_date,
            })
            .collect();

        info!(
            identities = identities.len(),
            without_demographics = with_demographics.unmatched,
            without_location = with_location.unmatched,
            rows = rows.len(),
            "built customer dimension"
        );

        (rows, stats)
    }
}
