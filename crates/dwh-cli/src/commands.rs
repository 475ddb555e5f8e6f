//! Command implementations. Each returns data for the summary printer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use dwh_core::{load_bronze, load_silver, load_warehouse};
use dwh_ingest::SourceManifest;
use dwh_model::{Layer, LayerLoadReport, TableId, TableRef};
use dwh_store::{ManifestEntry, MemoryStore, TableStore};
use dwh_validate::{QualityReport, SilverSnapshot, ValidationOptions, validate_silver};
use tracing::{info, info_span, warn};

use crate::settings::Settings;

/// Result of `dwh check`.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Loads performed first (dry runs only).
    pub loads: Vec<LayerLoadReport>,
    pub reports: Vec<QualityReport>,
}

impl CheckOutcome {
    pub fn has_errors(&self) -> bool {
        self.loads.iter().any(|load| !load.is_success())
            || self.reports.iter().any(QualityReport::has_errors)
    }
}

/// One row of `dwh tables`.
#[derive(Debug, Clone)]
pub struct TableStatus {
    pub table: TableId,
    pub source_path: PathBuf,
    pub source_present: bool,
    pub bronze: Option<ManifestEntry>,
    pub silver: Option<ManifestEntry>,
}

impl TableStatus {
    pub fn last_loaded(&self) -> Option<NaiveDateTime> {
        self.bronze
            .iter()
            .chain(self.silver.iter())
            .map(|entry| entry.dwh_create_date)
            .max()
    }
}

pub fn run_bronze(settings: &Settings) -> Result<Vec<LayerLoadReport>> {
    let manifest = settings.manifest()?;
    warn_missing_sources(&manifest);
    let ctx = settings.context();
    let report = if settings.dry_run {
        load_bronze(&manifest, &mut MemoryStore::new(), &ctx)
    } else {
        load_bronze(&manifest, &mut settings.csv_store(), &ctx)
    };
    Ok(vec![report])
}

/// Silver from the stored bronze tables. A dry run has no stored bronze,
/// so it loads bronze into memory first.
pub fn run_silver(settings: &Settings) -> Result<Vec<LayerLoadReport>> {
    let ctx = settings.context();
    if settings.dry_run {
        let manifest = settings.manifest()?;
        return Ok(load_warehouse(&manifest, &mut MemoryStore::new(), &ctx));
    }
    Ok(vec![load_silver(&mut settings.csv_store(), &ctx)])
}

pub fn run_load(settings: &Settings) -> Result<Vec<LayerLoadReport>> {
    let manifest = settings.manifest()?;
    warn_missing_sources(&manifest);
    let ctx = settings.context();
    let reports = if settings.dry_run {
        load_warehouse(&manifest, &mut MemoryStore::new(), &ctx)
    } else {
        load_warehouse(&manifest, &mut settings.csv_store(), &ctx)
    };
    Ok(reports)
}

/// Quality checks over silver. A dry run checks a fresh in-memory load.
pub fn run_check(settings: &Settings) -> Result<CheckOutcome> {
    let _span = info_span!("check").entered();
    let options = ValidationOptions::new(settings.context().reference_date);
    if settings.dry_run {
        let manifest = settings.manifest()?;
        let mut store = MemoryStore::new();
        let loads = load_warehouse(&manifest, &mut store, &settings.context());
        let reports = if loads.iter().all(LayerLoadReport::is_success) {
            check_store(&store, &options)?
        } else {
            Vec::new()
        };
        return Ok(CheckOutcome { loads, reports });
    }
    let reports = check_store(&settings.csv_store(), &options)?;
    Ok(CheckOutcome {
        loads: Vec::new(),
        reports,
    })
}

fn check_store(store: &impl TableStore, options: &ValidationOptions) -> Result<Vec<QualityReport>> {
    let snapshot = SilverSnapshot::from_store(store).context("read silver tables")?;
    let reports = validate_silver(&snapshot, options);
    let errors: usize = reports.iter().map(QualityReport::error_count).sum();
    let warnings: usize = reports.iter().map(QualityReport::warning_count).sum();
    info!(errors, warnings, "quality checks finished");
    Ok(reports)
}

/// Source files and last load of every table.
pub fn run_tables(settings: &Settings) -> Result<Vec<TableStatus>> {
    let manifest = settings.manifest()?;
    let store = settings.csv_store();
    let bronze = store.manifest(Layer::Bronze).context("read bronze manifest")?;
    let silver = store.manifest(Layer::Silver).context("read silver manifest")?;
    let find = |entries: &[ManifestEntry], table: TableRef| {
        entries.iter().find(|entry| entry.table == table).cloned()
    };

    TableId::ALL
        .into_iter()
        .map(|table| {
            let spec = manifest
                .spec(table)
                .with_context(|| format!("source for {table}"))?;
            Ok(TableStatus {
                table,
                source_path: spec.path.clone(),
                source_present: spec.path.is_file(),
                bronze: find(&bronze, TableRef::bronze(table)),
                silver: find(&silver, TableRef::silver(table)),
            })
        })
        .collect()
}

fn warn_missing_sources(manifest: &SourceManifest) {
    for (table, path) in manifest.missing_files() {
        warn!(table = %table, path = %path.display(), "source file not found");
    }
}
