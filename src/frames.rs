//! Polars views over the Gold projections
//!
//! Column names follow the Gold view definitions. Dates are rendered as ISO
//! strings.

use crate::customers::CustomerDimensionRow;
use crate::error::{GoldError, Result};
use crate::pipeline::StarSchema;
use crate::products::ProductDimensionRow;
use crate::sales::SalesFactRow;
use chrono::NaiveDate;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

fn iso(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn customers_frame(rows: &[CustomerDimensionRow]) -> Result<DataFrame> {
    let df = df! [
        "customer_key" => rows.iter().map(|r| r.customer_key).collect::<Vec<_>>(),
        "customer_id" => rows.iter().map(|r| r.customer_id).collect::<Vec<_>>(),
        "customer_number" => rows.iter().map(|r| r.customer_number.as_str()).collect::<Vec<_>>(),
        "first_name" => rows.iter().map(|r| r.first_name.as_deref()).collect::<Vec<_>>(),
        "last_name" => rows.iter().map(|r| r.last_name.as_deref()).collect::<Vec<_>>(),
        "country" => rows.iter().map(|r| r.country.as_deref()).collect::<Vec<_>>(),
        "marital_status" => rows.iter().map(|r| r.marital_status.as_deref()).collect::<Vec<_>>(),
        "gender" => rows.iter().map(|r| r.gender.as_str()).collect::<Vec<_>>(),
        "birthdate" => rows.iter().map(|r| iso(r.birthdate)).collect::<Vec<_>>(),
        "create_date" => rows.iter().map(|r| iso(r.create_date)).collect::<Vec<_>>()
    ]?;
    Ok(df)
}

pub fn products_frame(rows: &[ProductDimensionRow]) -> Result<DataFrame> {
    let df = df! [
        "product_key" => rows.iter().map(|r| r.product_key).collect::<Vec<_>>(),
        "product_id" => rows.iter().map(|r| r.product_id).collect::<Vec<_>>(),
        "product_number" => rows.iter().map(|r| r.product_number.as_str()).collect::<Vec<_>>(),
        "product_name" => rows.iter().map(|r| r.product_name.as_deref()).collect::<Vec<_>>(),
        "category_id" => rows.iter().map(|r| r.category_id.as_deref()).collect::<Vec<_>>(),
        "category" => rows.iter().map(|r| r.category.as_deref()).collect::<Vec<_>>(),
        "subcategory" => rows.iter().map(|r| r.subcategory.as_deref()).collect::<Vec<_>>(),
        "maintenance" => rows.iter().map(|r| r.maintenance.as_deref()).collect::<Vec<_>>(),
        "cost" => rows.iter().map(|r| r.cost).collect::<Vec<_>>(),
        "product_line" => rows.iter().map(|r| r.product_line.as_deref()).collect::<Vec<_>>(),
        "start_date" => rows.iter().map(|r| iso(r.start_date)).collect::<Vec<_>>()
    ]?;
    Ok(df)
}

pub fn sales_frame(rows: &[SalesFactRow]) -> Result<DataFrame> {
    let df = df! [
        "order_number" => rows.iter().map(|r| r.order_number.as_str()).collect::<Vec<_>>(),
        "product_key" => rows.iter().map(|r| r.product_key).collect::<Vec<_>>(),
        "customer_key" => rows.iter().map(|r| r.customer_key).collect::<Vec<_>>(),
        "order_date" => rows.iter().map(|r| iso(r.order_date)).collect::<Vec<_>>(),
        "shipping_date" => rows.iter().map(|r| iso(r.shipping_date)).collect::<Vec<_>>(),
        "due_date" => rows.iter().map(|r| iso(r.due_date)).collect::<Vec<_>>(),
        "sales_amount" => rows.iter().map(|r| r.sales_amount).collect::<Vec<_>>(),
        "quantity" => rows.iter().map(|r| r.quantity).collect::<Vec<_>>(),
        "price" => rows.iter().map(|r| r.price).collect::<Vec<_>>()
    ]?;
    Ok(df)
}

/// Query-time star join: every fact row with its product and customer attributes.
///
/// Fact rows without a dimension match keep null attributes.
pub fn sales_star_view(schema: &StarSchema) -> Result<DataFrame> {
    let facts = sales_frame(&schema.sales)?;
    let fact_rows = facts.height();

    let products = products_frame(&schema.products)?.lazy().select([
        col("product_key"),
        col("product_number"),
        col("product_name"),
        col("category"),
        col("subcategory"),
        col("product_line"),
    ]);
    let customers = customers_frame(&schema.customers)?.lazy().select([
        col("customer_key"),
        col("customer_number"),
        col("first_name"),
        col("last_name"),
        col("country"),
    ]);

    let view = facts
        .lazy()
        .join(
            products,
            [col("product_key")],
            [col("product_key")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            customers,
            [col("customer_key")],
            [col("customer_key")],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;

    // Surrogate keys are unique per dimension, so the join can never fan out
    if view.height() != fact_rows {
        return Err(GoldError::ReferenceAmbiguity {
            join: "sales_star_view".to_string(),
            key: "product_key/customer_key".to_string(),
            matches: view.height(),
        });
    }

    Ok(view)
}

pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(key: i64, id: i64, country: Option<&str>) -> CustomerDimensionRow {
        CustomerDimensionRow {
            customer_key: key,
            customer_id: id,
            customer_number: format!("C{}", id),
            first_name: None,
            last_name: None,
            country: country.map(str::to_string),
            marital_status: None,
            gender: "n/a".to_string(),
            birthdate: NaiveDate::from_ymd_opt(1971, 10, 6),
            create_date: None,
        }
    }

    fn fact(order: &str, customer_key: Option<i64>) -> SalesFactRow {
        SalesFactRow {
            order_number: order.to_string(),
            product_key: None,
            customer_key,
            order_date: None,
            shipping_date: None,
            due_date: None,
            sales_amount: Some(10),
            quantity: Some(1),
            price: Some(10),
        }
    }

    #[test]
    fn test_customer_frame_shape() {
        let df = customers_frame(&[customer(1, 11000, Some("Australia"))]).unwrap();

        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 10);
        let birthdate = df.column("birthdate").unwrap().str().unwrap().get(0);
        assert_eq!(birthdate, Some("1971-10-06"));
    }

    #[test]
    fn test_star_view_keeps_unmatched_facts() {
        let schema = StarSchema {
            customers: vec![customer(1, 11000, Some("Australia"))],
            products: Vec::new(),
            sales: vec![fact("SO1", Some(1)), fact("SO2", None)],
        };

        let view = sales_star_view(&schema).unwrap();

        assert_eq!(view.height(), 2);
        let countries = view.column("country").unwrap();
        assert_eq!(countries.null_count(), 1);
    }
}
