//! End-to-end loads from staged files into an on-disk warehouse.

mod common;

use chrono::NaiveDate;
use common::{context, stage_sources, started};
use dwh_core::{load_bronze, load_silver, load_warehouse};
use dwh_ingest::SourceManifest;
use dwh_model::{
    BronzeCustomer, Gender, Layer, LayerLoadReport, LoadMode, MaritalStatus, ProductLine,
    SilverCustomer, SilverCustomerDemographic, SilverLocation, SilverProduct, SilverSalesDetail,
    TableId, TableRef,
};
use dwh_store::{CsvStore, TableStore};
use tempfile::TempDir;

fn warehouse() -> (TempDir, SourceManifest, CsvStore) {
    let dir = TempDir::new().unwrap();
    stage_sources(&dir.path().join("datasets"));
    let manifest = SourceManifest::from_root(dir.path().join("datasets"));
    let store = CsvStore::new(dir.path().join("warehouse"));
    (dir, manifest, store)
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn bronze_loads_every_table_verbatim() {
    let (_dir, manifest, mut store) = warehouse();
    let report = load_bronze(&manifest, &mut store, &context());

    assert!(report.is_success(), "{:?}", report.failure);
    assert_eq!(report.layer, Layer::Bronze);
    let tables: Vec<_> = report.tables.iter().map(|t| t.table.table).collect();
    assert_eq!(tables, TableId::ALL.to_vec());
    let rows: Vec<_> = report.tables.iter().map(|t| t.rows_out).collect();
    assert_eq!(rows, vec![4, 4, 3, 2, 3, 2]);

    let customers: Vec<BronzeCustomer> = store.scan().unwrap();
    assert_eq!(customers[0].cst_firstname.as_deref(), Some(" Jon "));
    assert_eq!(customers[3].cst_id, None);
}

#[test]
fn bronze_manifest_records_source_fingerprints() {
    let (_dir, manifest, mut store) = warehouse();
    load_bronze(&manifest, &mut store, &context());

    let entries = store.manifest(Layer::Bronze).unwrap();
    assert_eq!(entries.len(), 6);
    for entry in &entries {
        assert_eq!(entry.dwh_create_date, started());
        let source = entry.source.as_ref().unwrap();
        assert_eq!(source.sha256.len(), 64);
        assert_eq!(source.rows_read, entry.rows);
    }
}

#[test]
fn silver_cleans_bronze() {
    let (_dir, manifest, mut store) = warehouse();
    load_bronze(&manifest, &mut store, &context());
    let report = load_silver(&mut store, &context());
    assert!(report.is_success(), "{:?}", report.failure);
    assert_eq!(report.tables[0].rows_in, 4);
    assert_eq!(report.tables[0].rows_out, 2);

    let customers: Vec<SilverCustomer> = store.scan().unwrap();
    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0].cst_id, 11000);
    assert_eq!(customers[0].cst_firstname.as_deref(), Some("Jon"));
    assert_eq!(customers[0].cst_lastname.as_deref(), Some("Yang"));
    assert_eq!(customers[0].cst_create_date, date(2025, 10, 7));
    assert_eq!(customers[1].cst_marital_status, MaritalStatus::Single);
    assert_eq!(customers[1].cst_gndr, Gender::Female);

    let products: Vec<SilverProduct> = store.scan().unwrap();
    let helmets: Vec<_> = products
        .iter()
        .filter(|p| p.prd_key.as_deref() == Some("HL-U509-R"))
        .collect();
    assert_eq!(helmets.len(), 2);
    assert_eq!(helmets[0].prd_end_dt, date(2012, 6, 30));
    assert_eq!(helmets[1].prd_end_dt, None);
    assert_eq!(helmets[0].cat_id.as_deref(), Some("AC_HE"));
    assert_eq!(helmets[0].prd_line, ProductLine::OtherSales);
    assert!(products.iter().any(|p| p.prd_id == Some(210) && p.prd_cost == 0));

    let sales: Vec<SilverSalesDetail> = store.scan().unwrap();
    assert_eq!(sales[1].sls_order_dt, None);
    assert_eq!(sales[1].sls_sales, Some(28));
    assert_eq!(sales[2].sls_sales, Some(28));
    assert_eq!(sales[0].sls_ship_dt, date(2011, 1, 5));

    let demographics: Vec<SilverCustomerDemographic> = store.scan().unwrap();
    assert_eq!(demographics[0].cid.as_deref(), Some("AW00011000"));
    assert_eq!(demographics[0].r#gen, Gender::Male);
    assert_eq!(demographics[1].bdate, None);
    assert_eq!(demographics[1].r#gen, Gender::Female);

    let locations: Vec<SilverLocation> = store.scan().unwrap();
    let countries: Vec<_> = locations.iter().map(|l| l.cntry.as_str()).collect();
    assert_eq!(countries, vec!["Australia", "United States", "n/a"]);
    assert_eq!(locations[1].cid.as_deref(), Some("AW00011001"));
}

#[test]
fn reloading_replaces_previous_contents() {
    let (_dir, manifest, mut store) = warehouse();
    load_warehouse(&manifest, &mut store, &context());
    let reports = load_warehouse(&manifest, &mut store, &context());

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(LayerLoadReport::is_success));
    let bronze = TableRef::bronze(TableId::CrmCustInfo);
    let silver = TableRef::silver(TableId::CrmCustInfo);
    assert_eq!(store.row_count(bronze).unwrap(), 4);
    assert_eq!(store.row_count(silver).unwrap(), 2);
}

#[test]
fn atomic_swap_mode_loads_the_same_rows() {
    let (_dir, manifest, mut store) = warehouse();
    let ctx = context().with_load_mode(LoadMode::AtomicSwap);
    let reports = load_warehouse(&manifest, &mut store, &ctx);

    assert!(reports.iter().all(LayerLoadReport::is_success));
    assert_eq!(reports[1].rows_out(), 2 + 4 + 3 + 2 + 3 + 2);
    assert!(store.table_path(TableRef::silver(TableId::ErpPxCatG1v2)).is_file());
}
