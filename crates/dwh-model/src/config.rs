//! Warehouse run configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::table::TableId;

/// How a table's previous contents are replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Truncate, then insert. A failed insert leaves the table empty.
    #[default]
    TwoPhase,
    /// Write the new contents aside and swap them in as one step.
    AtomicSwap,
}

/// Per-table overrides of the staged source file and how it is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOverride {
    /// Path relative to the source root (or absolute).
    pub path: Option<PathBuf>,
    /// Field delimiter, a single ASCII character.
    pub delimiter: Option<String>,
    /// Leading lines to skip before data rows.
    pub header_rows: Option<usize>,
    /// Stop after this many data rows.
    pub max_rows: Option<usize>,
}

impl SourceOverride {
    /// Delimiter as a byte, if one is configured.
    pub fn delimiter_byte(&self, table: &str) -> Result<Option<u8>> {
        let Some(value) = self.delimiter.as_deref() else {
            return Ok(None);
        };
        let bytes = value.as_bytes();
        match bytes {
            [byte] if byte.is_ascii() => Ok(Some(*byte)),
            _ if value == "\\t" => Ok(Some(b'\t')),
            _ => Err(ConfigError::InvalidDelimiter {
                table: table.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Configuration for a warehouse run, typically read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    /// Directory holding `source_crm/` and `source_erp/`.
    pub source_root: PathBuf,
    /// Directory the bronze and silver tables are written to.
    pub warehouse_dir: PathBuf,
    /// Date treated as "today" for future-date rules. Defaults to the run date.
    pub reference_date: Option<NaiveDate>,
    pub load_mode: LoadMode,
    /// Overrides keyed by table name, e.g. `crm_sales_details`.
    pub sources: BTreeMap<String, SourceOverride>,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("datasets"),
            warehouse_dir: PathBuf::from("warehouse"),
            reference_date: None,
            load_mode: LoadMode::default(),
            sources: BTreeMap::new(),
        }
    }
}

impl WarehouseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every override names a known table and has a usable delimiter.
    pub fn validate(&self) -> Result<()> {
        for (name, source) in &self.sources {
            if TableId::parse(name).is_none() {
                return Err(ConfigError::UnknownTable { name: name.clone() });
            }
            source.delimiter_byte(name)?;
        }
        Ok(())
    }

    pub fn source_override(&self, table: TableId) -> Option<&SourceOverride> {
        self.sources
            .iter()
            .find(|(name, _)| TableId::parse(name) == Some(table))
            .map(|(_, source)| source)
    }

    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = root.into();
        self
    }

    pub fn with_warehouse_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.warehouse_dir = dir.into();
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn with_load_mode(mut self, mode: LoadMode) -> Self {
        self.load_mode = mode;
        self
    }

    pub fn with_source(mut self, table: TableId, source: SourceOverride) -> Self {
        self.sources.insert(table.name().to_string(), source);
        self
    }
}
