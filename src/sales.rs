//! Sales fact
//!
//! Each sales line is resolved against the dimension outputs by business key.
//! A line is never dropped or duplicated: a missing dimension member becomes a
//! null key on the fact row.

use crate::customers::CustomerDimensionRow;
use crate::join::{left_join, LookupIndex, ProjectionStats};
use crate::products::ProductDimensionRow;
use crate::records::SalesLineRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One row of `fact_sales`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesFactRow {
    pub order_number: String,
    pub product_key: Option<i64>,
    pub customer_key: Option<i64>,
    pub order_date: Option<NaiveDate>,
    pub shipping_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub sales_amount: Option<i64>,
    pub quantity: Option<i64>,
    pub price: Option<i64>,
}

#[derive(Default)]
pub struct SalesFactBuilder;

impl SalesFactBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the sales fact; output order matches `sales`.
    ///
    /// When a business key appears on several dimension rows the row with the
    /// lowest surrogate key is used.
    pub fn build(
        &self,
        sales: &[SalesLineRecord],
        product_dim: &[ProductDimensionRow],
        customer_dim: &[CustomerDimensionRow],
    ) -> Vec<SalesFactRow> {
        self.build_with_stats(sales, product_dim, customer_dim).0
    }

    /// [`build`](Self::build), also returning the join counts of this projection
    pub fn build_with_stats(
        &self,
        sales: &[SalesLineRecord],
        product_dim: &[ProductDimensionRow],
        customer_dim: &[CustomerDimensionRow],
    ) -> (Vec<SalesFactRow>, ProjectionStats) {
        let mut products: Vec<&ProductDimensionRow> = product_dim.iter().collect();
        products.sort_by_key(|p| p.product_key);
        let mut customers: Vec<&CustomerDimensionRow> = customer_dim.iter().collect();
        customers.sort_by_key(|c| c.customer_key);

        let products_by_number = LookupIndex::build("dim_products", products.iter().copied(), |p| {
            p.product_number.as_str()
        });
        let customers_by_id =
            LookupIndex::build("dim_customers", customers.iter().copied(), |c| c.customer_id);

        let with_product = left_join(sales, &products_by_number, |s| Some(s.product_key.as_str()));
        let with_customer = left_join(sales, &customers_by_id, |s| Some(s.customer_id));

        let mut stats = ProjectionStats::new(sales.len(), sales.len());
        stats.record(&products_by_number, &with_product);
        stats.record(&customers_by_id, &with_customer);

        let rows: Vec<SalesFactRow> = with_product
            .pairs
            .into_iter()
            .zip(with_customer.pairs)
            .map(|((line, product), (_, customer))| SalesFactRow {
                order_number: line.order_number.clone(),
                product_key: product.map(|p| p.product_key),
                customer_key: customer.map(|c| c.customer_key),
                order_date: line.order_date,
                shipping_date: line.ship_date,
                due_date: line.due_date,
                sales_amount: line.sales_amount,
                quantity: line.quantity,
                price: line.price,
            })
            .collect();

        info!(
            lines = sales.len(),
            without_product = with_product.unmatched,
            without_customer = with_customer.unmatched,
            "built sales fact"
        );

        (rows, stats)
    }
}
