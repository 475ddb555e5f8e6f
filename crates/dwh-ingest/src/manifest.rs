//! Where each table's staged file lives and how to read it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dwh_model::{TableId, WarehouseConfig};

use crate::error::{IngestError, Result};
use crate::reader::CsvOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub options: CsvOptions,
}

/// Source location and read options for every table.
#[derive(Debug, Clone)]
pub struct SourceManifest {
    root: PathBuf,
    specs: BTreeMap<TableId, SourceSpec>,
}

impl SourceManifest {
    /// Default layout under `root`: `source_crm/*.csv` and `source_erp/*.csv`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let specs = TableId::ALL
            .into_iter()
            .map(|table| {
                let spec = SourceSpec {
                    path: root.join(table.default_source_path()),
                    options: CsvOptions::default(),
                };
                (table, spec)
            })
            .collect();
        Self { root, specs }
    }

    /// Default layout with per-table overrides applied.
    pub fn from_config(config: &WarehouseConfig) -> Result<Self> {
        config.validate()?;
        let mut manifest = Self::from_root(&config.source_root);
        for table in TableId::ALL {
            let Some(source) = config.source_override(table) else {
                continue;
            };
            let delimiter = source.delimiter_byte(table.name())?;
            let Some(spec) = manifest.specs.get_mut(&table) else {
                continue;
            };
            if let Some(path) = &source.path {
                spec.path = config.source_root.join(path);
            }
            if let Some(delimiter) = delimiter {
                spec.options.delimiter = delimiter;
            }
            if let Some(rows) = source.header_rows {
                spec.options.header_rows = rows;
            }
            if source.max_rows.is_some() {
                spec.options.max_rows = source.max_rows;
            }
        }
        Ok(manifest)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn spec(&self, table: TableId) -> Result<&SourceSpec> {
        self.specs
            .get(&table)
            .ok_or(IngestError::MissingSource { table })
    }

    /// Tables whose staged file does not exist.
    pub fn missing_files(&self) -> Vec<(TableId, PathBuf)> {
        self.specs
            .iter()
            .filter(|(_, spec)| !spec.path.is_file())
            .map(|(table, spec)| (*table, spec.path.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwh_model::SourceOverride;

    #[test]
    fn default_layout() {
        let manifest = SourceManifest::from_root("/data");
        let spec = manifest.spec(TableId::ErpLocA101).unwrap();
        assert_eq!(spec.path, PathBuf::from("/data/source_erp/LOC_A101.csv"));
        assert_eq!(spec.options, CsvOptions::default());
    }

    #[test]
    fn overrides_apply_per_table() {
        let config = WarehouseConfig::default()
            .with_source_root("/staged")
            .with_source(
                TableId::CrmSalesDetails,
                SourceOverride {
                    path: Some(PathBuf::from("sales.txt")),
                    delimiter: Some("|".to_string()),
                    header_rows: Some(2),
                    max_rows: Some(10),
                },
            );
        let manifest = SourceManifest::from_config(&config).unwrap();
        let sales = manifest.spec(TableId::CrmSalesDetails).unwrap();
        assert_eq!(sales.path, PathBuf::from("/staged/sales.txt"));
        assert_eq!(sales.options.delimiter, b'|');
        assert_eq!(sales.options.header_rows, 2);
        assert_eq!(sales.options.max_rows, Some(10));

        let customers = manifest.spec(TableId::CrmCustInfo).unwrap();
        assert_eq!(customers.options, CsvOptions::default());
    }
}
