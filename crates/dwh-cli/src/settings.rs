//! Resolved run settings: config file first, then command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use dwh_core::PipelineContext;
use dwh_ingest::SourceManifest;
use dwh_model::{LoadMode, WarehouseConfig};
use dwh_store::CsvStore;

/// Values given on the command line that win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source_root: Option<PathBuf>,
    pub warehouse_dir: Option<PathBuf>,
    pub reference_date: Option<NaiveDate>,
    pub atomic_swap: bool,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub config: WarehouseConfig,
    /// Load into memory only; nothing under the warehouse directory changes.
    pub dry_run: bool,
    pub started_at: NaiveDateTime,
}

impl Settings {
    /// Read `config_path` (or use defaults) and apply `overrides`.
    pub fn resolve(config_path: Option<&Path>, overrides: Overrides, dry_run: bool) -> Result<Self> {
        let config = match config_path {
            Some(path) => WarehouseConfig::from_path(path)
                .with_context(|| format!("load config {}", path.display()))?,
            None => WarehouseConfig::default(),
        };
        Ok(Self::from_config(config, overrides, dry_run))
    }

    pub fn from_config(mut config: WarehouseConfig, overrides: Overrides, dry_run: bool) -> Self {
        if let Some(root) = overrides.source_root {
            config.source_root = root;
        }
        if let Some(dir) = overrides.warehouse_dir {
            config.warehouse_dir = dir;
        }
        if let Some(date) = overrides.reference_date {
            config.reference_date = Some(date);
        }
        if overrides.atomic_swap {
            config.load_mode = LoadMode::AtomicSwap;
        }
        Self {
            config,
            dry_run,
            started_at: Local::now().naive_local(),
        }
    }

    #[must_use]
    pub fn with_started_at(mut self, started_at: NaiveDateTime) -> Self {
        self.started_at = started_at;
        self
    }

    pub fn context(&self) -> PipelineContext {
        PipelineContext::from_config(&self.config, self.started_at)
    }

    pub fn manifest(&self) -> Result<SourceManifest> {
        SourceManifest::from_config(&self.config).context("resolve source files")
    }

    pub fn csv_store(&self) -> CsvStore {
        CsvStore::new(&self.config.warehouse_dir)
    }
}
