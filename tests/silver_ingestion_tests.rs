use gold_layer::frames;
use gold_layer::ingestion::SilverLoader;
use gold_layer::{GoldConfig, GoldError, GoldPipeline, QualityReport, SourceFiles};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_silver(dir: &Path) {
    fs::write(
        dir.join("crm_cust_info.csv"),
        "cst_id,cst_key,cst_firstname,cst_lastname,cst_marital_status,cst_gndr,cst_create_date\n\
         11001,AW00011001,Eugene,Huang,Single,,2025-10-06\n\
         11000,AW00011000,Jon,Yang,Married,n/a,2025-10-06\n",
    )
    .unwrap();
    fs::write(
        dir.join("erp_cust_az12.csv"),
        "cid,bdate,gen\n\
         AW00011000,1971-10-06,Male\n",
    )
    .unwrap();
    fs::write(
        dir.join("erp_loc_a101.csv"),
        "cid,cntry\n\
         AW00011000,Australia\n\
         AW00011001,\n",
    )
    .unwrap();
    fs::write(
        dir.join("crm_prd_info.csv"),
        "prd_id,cat_id,prd_key,prd_nm,prd_cost,prd_line,prd_start_dt,prd_end_dt\n\
         478,AC_BC,BC-M005,Mountain Bottle Cage,4,Mountain,2013-07-01,\n\
         210,CO_RF,FR-R92B-58,HL Road Frame - Black- 58,0,Road,2003-07-01,2007-12-28\n",
    )
    .unwrap();
    fs::write(
        dir.join("erp_px_cat_g1v2.csv"),
        "id,cat,subcat,maintenance\n\
         AC_BC,Accessories,Bottles and Cages,No\n",
    )
    .unwrap();
    fs::write(
        dir.join("crm_sales_details.csv"),
        "sls_ord_num,sls_prd_key,sls_cust_id,sls_order_dt,sls_ship_dt,sls_due_dt,sls_sales,sls_quantity,sls_price\n\
         SO51176,BC-M005,11000,2013-06-30,2013-07-07,2013-07-12,9,1,9\n\
         SO51177,FR-R92B-58,11001,2013-06-30,,,0,1,\n",
    )
    .unwrap();
}

#[test]
fn test_csv_extracts_build_star_schema() {
    let dir = TempDir::new().unwrap();
    write_silver(dir.path());

    let inputs = SilverLoader::new(dir.path(), SourceFiles::default()).load().unwrap();
    let schema = GoldPipeline::default().build(&inputs).unwrap();

    assert_eq!(schema.customers.len(), 2);
    assert_eq!(schema.customers[0].customer_id, 11000);
    assert_eq!(schema.customers[0].gender, "Male");
    assert_eq!(schema.customers[1].gender, "n/a");
    assert_eq!(schema.customers[1].country, None);

    assert_eq!(schema.products.len(), 1);
    assert_eq!(schema.products[0].subcategory.as_deref(), Some("Bottles and Cages"));

    assert_eq!(schema.sales.len(), 2);
    assert_eq!(schema.sales[0].product_key, Some(1));
    assert_eq!(schema.sales[1].product_key, None);
    assert_eq!(schema.sales[1].customer_key, Some(2));
    assert_eq!(schema.sales[1].price, None);

    let report = QualityReport::evaluate(&schema);
    assert_eq!(report.sales.missing_product_key, 1);
    assert!(!report.is_clean());
}

#[test]
fn test_star_view_written_as_csv() {
    let dir = TempDir::new().unwrap();
    write_silver(dir.path());

    let inputs = SilverLoader::new(dir.path(), SourceFiles::default()).load().unwrap();
    let schema = GoldPipeline::default().build(&inputs).unwrap();

    let mut view = frames::sales_star_view(&schema).unwrap();
    assert_eq!(view.height(), schema.sales.len());

    let out = dir.path().join("sales_star.csv");
    frames::write_csv(&mut view, &out).unwrap();
    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), schema.sales.len() + 1);
    assert!(written.lines().next().unwrap().contains("order_number"));
}

#[test]
fn test_strict_build_rejects_duplicate_current_product() {
    let dir = TempDir::new().unwrap();
    write_silver(dir.path());
    fs::write(
        dir.path().join("crm_prd_info.csv"),
        "prd_id,cat_id,prd_key,prd_nm,prd_cost,prd_line,prd_start_dt,prd_end_dt\n\
         478,AC_BC,BC-M005,Mountain Bottle Cage,4,Mountain,2013-07-01,\n\
         479,AC_BC,BC-M005,Mountain Bottle Cage,5,Mountain,2013-08-01,\n",
    )
    .unwrap();

    let inputs = SilverLoader::new(dir.path(), SourceFiles::default()).load().unwrap();
    let strict = GoldPipeline::new(GoldConfig {
        strict: true,
        ..Default::default()
    });

    assert!(matches!(
        strict.build(&inputs),
        Err(GoldError::PreconditionViolation { .. })
    ));
    assert_eq!(GoldPipeline::default().build(&inputs).unwrap().products.len(), 2);
}
