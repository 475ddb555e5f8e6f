//! Abort behavior: the first failing table stops the layer.

mod common;

use std::fs;

use common::{context, stage_sources};
use dwh_core::{load_bronze, load_silver, load_warehouse};
use dwh_ingest::SourceManifest;
use dwh_model::{Layer, LoadMode, LoadStage, Record, TableId, TableRef};
use dwh_store::{ManifestEntry, MemoryStore, StoreError, TableStore};
use tempfile::TempDir;

/// Delegates to a [`MemoryStore`] but refuses inserts into one table.
#[derive(Debug, Default)]
struct RejectingStore {
    inner: MemoryStore,
    reject: Option<TableRef>,
}

impl RejectingStore {
    fn rejecting(&mut self, table: TableRef) {
        self.reject = Some(table);
    }

    fn check<R: Record>(&self) -> dwh_store::Result<()> {
        match self.reject {
            Some(table) if table == R::TABLE => Err(StoreError::Rejected {
                table,
                message: "disk full".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl TableStore for RejectingStore {
    fn truncate(&mut self, table: TableRef) -> dwh_store::Result<()> {
        self.inner.truncate(table)
    }

    fn insert<R: Record>(&mut self, rows: &[R]) -> dwh_store::Result<usize> {
        self.check::<R>()?;
        self.inner.insert(rows)
    }

    fn scan<R: Record>(&self) -> dwh_store::Result<Vec<R>> {
        self.inner.scan()
    }

    fn row_count(&self, table: TableRef) -> dwh_store::Result<usize> {
        self.inner.row_count(table)
    }

    fn replace_atomic<R: Record>(&mut self, rows: &[R]) -> dwh_store::Result<usize> {
        self.check::<R>()?;
        self.inner.replace_atomic(rows)
    }

    fn record_manifest(&mut self, entry: ManifestEntry) -> dwh_store::Result<()> {
        self.inner.record_manifest(entry)
    }

    fn manifest(&self, layer: Layer) -> dwh_store::Result<Vec<ManifestEntry>> {
        self.inner.manifest(layer)
    }
}

fn staged() -> (TempDir, SourceManifest) {
    let dir = TempDir::new().unwrap();
    stage_sources(dir.path());
    let manifest = SourceManifest::from_root(dir.path());
    (dir, manifest)
}

#[test]
fn missing_source_aborts_bronze() {
    let (dir, manifest) = staged();
    fs::remove_file(dir.path().join("source_crm/prd_info.csv")).unwrap();
    let mut store = MemoryStore::new();

    let report = load_bronze(&manifest, &mut store, &context());

    let failure = report.failure.as_ref().unwrap();
    assert_eq!(failure.table, Some(TableRef::bronze(TableId::CrmPrdInfo)));
    assert_eq!(failure.code, 1001);
    assert_eq!(failure.state, LoadStage::Read);
    assert!(failure.message.contains("prd_info.csv"));

    assert_eq!(report.tables.len(), 1);
    // Two-phase: the failing table was truncated before the read.
    assert_eq!(store.row_count(TableRef::bronze(TableId::CrmPrdInfo)).unwrap(), 0);
    assert!(!store.contains(TableRef::bronze(TableId::CrmSalesDetails)));
}

#[test]
fn atomic_swap_keeps_previous_contents_on_failure() {
    let (dir, manifest) = staged();
    let mut store = MemoryStore::new();
    let ctx = context().with_load_mode(LoadMode::AtomicSwap);
    assert!(load_bronze(&manifest, &mut store, &ctx).is_success());

    fs::remove_file(dir.path().join("source_crm/prd_info.csv")).unwrap();
    let report = load_bronze(&manifest, &mut store, &ctx);

    assert!(!report.is_success());
    assert_eq!(store.row_count(TableRef::bronze(TableId::CrmPrdInfo)).unwrap(), 4);
}

#[test]
fn rejected_insert_leaves_table_empty() {
    let (_dir, manifest) = staged();
    let mut store = RejectingStore::default();
    assert!(load_bronze(&manifest, &mut store, &context()).is_success());
    assert!(load_silver(&mut store, &context()).is_success());

    let sales = TableRef::silver(TableId::CrmSalesDetails);
    store.rejecting(sales);
    let report = load_silver(&mut store, &context());

    let failure = report.failure.as_ref().unwrap();
    assert_eq!(failure.table, Some(sales));
    assert_eq!(failure.code, 2007);
    assert_eq!(failure.state, LoadStage::Insert);
    assert_eq!(report.tables.len(), 2);
    assert_eq!(store.row_count(sales).unwrap(), 0);
    // Later tables still hold the previous run.
    assert_eq!(
        store
            .row_count(TableRef::silver(TableId::ErpLocA101))
            .unwrap(),
        3
    );
}

#[test]
fn rejected_atomic_replace_keeps_table() {
    let (_dir, manifest) = staged();
    let mut store = RejectingStore::default();
    let ctx = context().with_load_mode(LoadMode::AtomicSwap);
    load_warehouse(&manifest, &mut store, &ctx);

    let products = TableRef::silver(TableId::CrmPrdInfo);
    store.rejecting(products);
    let report = load_silver(&mut store, &ctx);

    assert_eq!(report.failure.as_ref().unwrap().state, LoadStage::Insert);
    assert_eq!(store.row_count(products).unwrap(), 4);
}

#[test]
fn silver_without_bronze_reports_missing_table() {
    let mut store = MemoryStore::new();
    let report = load_silver(&mut store, &context());

    assert!(report.tables.is_empty());
    insta::assert_json_snapshot!(report.failure, @r#"
    {
      "table": {
        "layer": "silver",
        "table": "crm_cust_info"
      },
      "message": "table bronze.crm_cust_info has not been loaded",
      "code": 2005,
      "state": "read"
    }
    "#);
}

#[test]
fn warehouse_load_skips_silver_after_bronze_failure() {
    let (dir, manifest) = staged();
    fs::remove_file(dir.path().join("source_erp/LOC_A101.csv")).unwrap();
    let mut store = MemoryStore::new();

    let reports = load_warehouse(&manifest, &mut store, &context());

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].tables.len(), 4);
    assert!(!store.contains(TableRef::silver(TableId::CrmCustInfo)));
}
