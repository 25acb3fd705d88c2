//! Silver-layer input records
//!
//! Field names follow the Gold vocabulary; serde renames map them onto the
//! Silver table columns so CSV extracts deserialize directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// CRM customer identity row (`crm_cust_info`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "cst_id")]
    pub customer_id: i64,
    #[serde(rename = "cst_key")]
    pub customer_key: String,
    #[serde(rename = "cst_firstname")]
    pub first_name: Option<String>,
    #[serde(rename = "cst_lastname")]
    pub last_name: Option<String>,
    #[serde(rename = "cst_marital_status")]
    pub marital_status: Option<String>,
    #[serde(rename = "cst_gndr")]
    pub gender: Option<String>,
    #[serde(rename = "cst_create_date")]
    pub create_date: Option<NaiveDate>,
}

impl CustomerRecord {
    pub fn new(customer_id: i64, customer_key: impl Into<String>) -> Self {
        Self {
            customer_id,
            customer_key: customer_key.into(),
            first_name: None,
            last_name: None,
            marital_status: None,
            gender: None,
            create_date: None,
        }
    }

    pub fn with_name(mut self, first: &str, last: &str) -> Self {
        self.first_name = Some(first.to_string());
        self.last_name = Some(last.to_string());
        self
    }

    pub fn with_gender(mut self, gender: &str) -> Self {
        self.gender = Some(gender.to_string());
        self
    }

    pub fn with_marital_status(mut self, status: &str) -> Self {
        self.marital_status = Some(status.to_string());
        self
    }

    pub fn with_create_date(mut self, date: NaiveDate) -> Self {
        self.create_date = Some(date);
        self
    }
}

/// ERP demographics row (`erp_cust_az12`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDemographics {
    #[serde(rename = "cid")]
    pub customer_key: String,
    #[serde(rename = "bdate")]
    pub birthdate: Option<NaiveDate>,
    #[serde(rename = "gen")]
    pub gender: Option<String>,
}

impl CustomerDemographics {
    pub fn new(customer_key: impl Into<String>) -> Self {
        Self {
            customer_key: customer_key.into(),
            birthdate: None,
            gender: None,
        }
    }

    pub fn with_birthdate(mut self, date: NaiveDate) -> Self {
        self.birthdate = Some(date);
        self
    }

    pub fn with_gender(mut self, gender: &str) -> Self {
        self.gender = Some(gender.to_string());
        self
    }
}

/// ERP location row (`erp_loc_a101`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerLocation {
    #[serde(rename = "cid")]
    pub customer_key: String,
    #[serde(rename = "cntry")]
    pub country: Option<String>,
}

impl CustomerLocation {
    pub fn new(customer_key: impl Into<String>, country: &str) -> Self {
        Self {
            customer_key: customer_key.into(),
            country: Some(country.to_string()),
        }
    }
}

/// CRM product row (`crm_prd_info`), one per product version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "prd_id")]
    pub product_id: i64,
    #[serde(rename = "cat_id")]
    pub category_id: Option<String>,
    #[serde(rename = "prd_key")]
    pub product_key: String,
    #[serde(rename = "prd_nm")]
    pub name: Option<String>,
    #[serde(rename = "prd_cost")]
    pub cost: Option<i64>,
    #[serde(rename = "prd_line")]
    pub product_line: Option<String>,
    #[serde(rename = "prd_start_dt")]
    pub start_date: Option<NaiveDate>,
    /// `None` marks the currently active version
    #[serde(rename = "prd_end_dt")]
    pub end_date: Option<NaiveDate>,
}

impl ProductRecord {
    pub fn new(product_id: i64, product_key: impl Into<String>) -> Self {
        Self {
            product_id,
            category_id: None,
            product_key: product_key.into(),
            name: None,
            cost: None,
            product_line: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_category(mut self, category_id: &str) -> Self {
        self.category_id = Some(category_id.to_string());
        self
    }

    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_product_line(mut self, line: &str) -> Self {
        self.product_line = Some(line.to_string());
        self
    }

    pub fn with_validity(mut self, start: NaiveDate, end: Option<NaiveDate>) -> Self {
        self.start_date = Some(start);
        self.end_date = end;
        self
    }

    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}

/// ERP category row (`erp_px_cat_g1v2`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCategory {
    #[serde(rename = "id")]
    pub category_id: String,
    #[serde(rename = "cat")]
    pub category: Option<String>,
    #[serde(rename = "subcat")]
    pub subcategory: Option<String>,
    pub maintenance: Option<String>,
}

impl ProductCategory {
    pub fn new(category_id: &str, category: &str, subcategory: &str, maintenance: &str) -> Self {
        Self {
            category_id: category_id.to_string(),
            category: Some(category.to_string()),
            subcategory: Some(subcategory.to_string()),
            maintenance: Some(maintenance.to_string()),
        }
    }
}

/// CRM sales line (`crm_sales_details`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesLineRecord {
    #[serde(rename = "sls_ord_num")]
    pub order_number: String,
    #[serde(rename = "sls_prd_key")]
    pub product_key: String,
    #[serde(rename = "sls_cust_id")]
    pub customer_id: i64,
    #[serde(rename = "sls_order_dt")]
    pub order_date: Option<NaiveDate>,
    #[serde(rename = "sls_ship_dt")]
    pub ship_date: Option<NaiveDate>,
    #[serde(rename = "sls_due_dt")]
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "sls_sales")]
    pub sales_amount: Option<i64>,
    #[serde(rename = "sls_quantity")]
    pub quantity: Option<i64>,
    #[serde(rename = "sls_price")]
    pub price: Option<i64>,
}

impl SalesLineRecord {
    pub fn new(order_number: &str, product_key: &str, customer_id: i64) -> Self {
        Self {
            order_number: order_number.to_string(),
            product_key: product_key.to_string(),
            customer_id,
            order_date: None,
            ship_date: None,
            due_date: None,
            sales_amount: None,
            quantity: None,
            price: None,
        }
    }

    pub fn with_measures(mut self, sales_amount: i64, quantity: i64, price: i64) -> Self {
        self.sales_amount = Some(sales_amount);
        self.quantity = Some(quantity);
        self.price = Some(price);
        self
    }

    pub fn with_dates(mut self, order: NaiveDate, ship: NaiveDate, due: NaiveDate) -> Self {
        self.order_date = Some(order);
        self.ship_date = Some(ship);
        self.due_date = Some(due);
        self
    }
}
