//! Tests for the silver quality checks.

use chrono::NaiveDate;
use dwh_model::{
    Gender, MaritalStatus, ProductLine, SilverCategory, SilverCustomer,
    SilverCustomerDemographic, SilverLocation, SilverProduct, SilverSalesDetail, TableId,
};
use dwh_store::{MemoryStore, TableStore};
use dwh_validate::{Issue, Severity, SilverSnapshot, ValidationOptions, validate_silver};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn options() -> ValidationOptions {
    ValidationOptions::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
}

fn clean_snapshot() -> SilverSnapshot {
    SilverSnapshot {
        customers: vec![SilverCustomer {
            cst_id: 11000,
            cst_key: Some("AW00011000".to_string()),
            cst_firstname: Some("Jon".to_string()),
            cst_lastname: Some("Yang".to_string()),
            cst_marital_status: MaritalStatus::Married,
            cst_gndr: Gender::Male,
            cst_create_date: date(2025, 10, 6),
        }],
        products: vec![SilverProduct {
            prd_id: Some(210),
            cat_id: Some("CO_RF".to_string()),
            prd_key: Some("FR-R92B-58".to_string()),
            prd_nm: Some("HL Road Frame - Black- 58".to_string()),
            prd_cost: 0,
            prd_line: ProductLine::Road,
            prd_start_dt: date(2003, 7, 1),
            prd_end_dt: None,
        }],
        sales: vec![SilverSalesDetail {
            sls_ord_num: Some("SO43697".to_string()),
            sls_prd_key: Some("FR-R92B-58".to_string()),
            sls_cust_id: Some(11000),
            sls_order_dt: date(2010, 12, 29),
            sls_ship_dt: date(2011, 1, 5),
            sls_due_dt: date(2011, 1, 10),
            sls_sales: Some(3578),
            sls_quantity: Some(1),
            sls_price: Some(3578),
        }],
        demographics: vec![SilverCustomerDemographic {
            cid: Some("AW00011000".to_string()),
            bdate: date(1971, 10, 6),
            r#gen: Gender::Male,
        }],
        locations: vec![SilverLocation {
            cid: Some("AW00011000".to_string()),
            cntry: "Australia".to_string(),
        }],
        categories: vec![SilverCategory {
            id: Some("CO_RF".to_string()),
            cat: Some("Components".to_string()),
            subcat: Some("Road Frames".to_string()),
            maintenance: Some("No".to_string()),
        }],
    }
}

fn issues_for(snapshot: &SilverSnapshot, table: TableId) -> Vec<Issue> {
    validate_silver(snapshot, &options())
        .into_iter()
        .find(|report| report.table.table == table)
        .map(|report| report.issues)
        .unwrap_or_default()
}

#[test]
fn clean_snapshot_has_no_issues() {
    let reports = validate_silver(&clean_snapshot(), &options());
    assert_eq!(reports.len(), 6);
    for report in &reports {
        assert!(report.is_empty(), "{}: {:?}", report.table, report.issues);
    }
}

#[test]
fn reports_follow_load_order() {
    let tables: Vec<_> = validate_silver(&clean_snapshot(), &options())
        .iter()
        .map(|r| r.table.table)
        .collect();
    assert_eq!(tables, TableId::ALL.to_vec());
}

#[test]
fn duplicate_customers_and_untrimmed_names() {
    let mut snapshot = clean_snapshot();
    let mut dup = snapshot.customers[0].clone();
    dup.cst_firstname = Some(" Jon".to_string());
    snapshot.customers.push(dup);

    let issues = issues_for(&snapshot, TableId::CrmCustInfo);
    let rules: Vec<_> = issues.iter().map(Issue::rule_id).collect();
    assert_eq!(rules, vec!["DQ002", "DQ010"]);
    assert_eq!(issues[0].samples(), &["11000 (x2)".to_string()]);
}

#[test]
fn product_end_before_start_is_an_error() {
    let mut snapshot = clean_snapshot();
    snapshot.products[0].prd_end_dt = date(2003, 6, 30);
    let issues = issues_for(&snapshot, TableId::CrmPrdInfo);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id(), "DQ030");
    assert_eq!(issues[0].severity(), Severity::Error);
}

#[test]
fn sales_order_ship_due_and_amounts() {
    let mut snapshot = clean_snapshot();
    let sale = &mut snapshot.sales[0];
    sale.sls_ship_dt = date(2010, 12, 1);
    sale.sls_sales = Some(10);

    let issues = issues_for(&snapshot, TableId::CrmSalesDetails);
    let columns: Vec<_> = issues.iter().map(|i| (i.rule_id(), i.column())).collect();
    assert_eq!(
        columns,
        vec![
            ("DQ030", "sls_order_dt/sls_ship_dt".to_string()),
            ("DQ040", "sls_sales".to_string()),
        ]
    );
}

#[test]
fn orphan_sales_references() {
    let mut snapshot = clean_snapshot();
    snapshot.sales[0].sls_prd_key = Some("BK-R93R-62".to_string());
    snapshot.sales[0].sls_cust_id = Some(99);

    let issues = issues_for(&snapshot, TableId::CrmSalesDetails);
    assert_eq!(issues.len(), 2);
    assert!(issues.iter().all(|i| i.rule_id() == "DQ060"));
    assert_eq!(
        issues[0].message(),
        "1 sls_prd_key value(s) have no match in silver.crm_prd_info.prd_key"
    );
}

#[test]
fn unmatched_customer_keys_only_warn() {
    let mut snapshot = clean_snapshot();
    snapshot.demographics[0].cid = Some("AW00099999".to_string());
    let reports = validate_silver(&snapshot, &options());
    let customers = &reports[0];
    assert_eq!(customers.error_count(), 0);
    assert_eq!(customers.warning_count(), 1);
}

#[test]
fn implausible_birth_dates_warn() {
    let mut snapshot = clean_snapshot();
    snapshot.demographics[0].bdate = date(1916, 2, 10);
    let issues = issues_for(&snapshot, TableId::ErpCustAz12);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity(), Severity::Warning);
    assert_eq!(issues[0].samples(), &["AW00011000: 1916-02-10".to_string()]);
}

#[test]
fn raw_country_codes_are_flagged() {
    let mut snapshot = clean_snapshot();
    snapshot.locations.push(SilverLocation {
        cid: Some("AW00011001".to_string()),
        cntry: "US".to_string(),
    });
    let issues = issues_for(&snapshot, TableId::ErpLocA101);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id(), "DQ020");
}

#[test]
fn snapshot_reads_from_store() {
    let snapshot = clean_snapshot();
    let mut store = MemoryStore::new();
    store.replace(&snapshot.customers).unwrap();
    store.replace(&snapshot.products).unwrap();
    store.replace(&snapshot.sales).unwrap();
    store.replace(&snapshot.demographics).unwrap();
    store.replace(&snapshot.locations).unwrap();
    store.replace(&snapshot.categories).unwrap();
    assert_eq!(SilverSnapshot::from_store(&store).unwrap(), snapshot);
}

#[test]
fn issue_serialization_shape() {
    let issue = Issue::DuplicateKey {
        column: "cid".to_string(),
        count: 1,
        samples: vec!["AW00011000 (x2)".to_string()],
    };
    insta::assert_json_snapshot!(issue, @r#"
    {
      "DuplicateKey": {
        "column": "cid",
        "count": 1,
        "samples": [
          "AW00011000 (x2)"
        ]
      }
    }
    "#);
}
