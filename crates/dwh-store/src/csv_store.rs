//! Directory-backed store with one CSV file per table.
//!
//! Layout:
//!
//! ```text
//! <root>/bronze/crm_cust_info.csv
//! <root>/bronze/_manifest.json
//! <root>/silver/crm_cust_info.csv
//! ...
//! ```
//!
//! Each file starts with a header row naming the record's columns. An empty
//! file is a truncated table.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use dwh_model::{Layer, Record, TableRef};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::manifest::{ManifestEntry, upsert};
use crate::store::TableStore;

const MANIFEST_FILE: &str = "_manifest.json";

#[derive(Debug, Clone)]
pub struct CsvStore {
    root: PathBuf,
}

fn io_error(operation: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io {
        operation,
        path,
        source,
    }
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Csv { path, source }
}

impl CsvStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table_path(&self, table: TableRef) -> PathBuf {
        self.layer_dir(table.layer).join(format!("{}.csv", table.table.name()))
    }

    fn layer_dir(&self, layer: Layer) -> PathBuf {
        self.root.join(layer.as_str())
    }

    fn manifest_path(&self, layer: Layer) -> PathBuf {
        self.layer_dir(layer).join(MANIFEST_FILE)
    }

    fn ensure_layer_dir(&self, layer: Layer) -> Result<()> {
        let dir = self.layer_dir(layer);
        fs::create_dir_all(&dir).map_err(io_error("create directory", &dir))
    }

    /// Write `rows` to `file`, with a header row when `header` is set.
    fn write_rows<R: Record>(path: &Path, file: &mut File, rows: &[R], header: bool) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if header {
            writer.write_record(R::COLUMNS).map_err(csv_error(path))?;
        }
        for row in rows {
            writer.serialize(row).map_err(csv_error(path))?;
        }
        writer.flush().map_err(io_error("write", path))
    }

    /// Fill a temp file next to `path`, then rename it over `path`.
    fn write_atomic(path: &Path, write: impl FnOnce(&mut File) -> Result<()>) -> Result<()> {
        let mut temp_name = path.as_os_str().to_os_string();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        let mut file = File::create(&temp_path).map_err(io_error("create", &temp_path))?;
        write(&mut file)?;
        file.sync_all().map_err(io_error("sync", &temp_path))?;

        fs::rename(&temp_path, path).map_err(|source| StoreError::AtomicSwapFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source,
        })
    }
}

impl TableStore for CsvStore {
    fn truncate(&mut self, table: TableRef) -> Result<()> {
        self.ensure_layer_dir(table.layer)?;
        let path = self.table_path(table);
        File::create(&path).map_err(io_error("truncate", &path))?;
        debug!(table = %table, path = %path.display(), "truncated table");
        Ok(())
    }

    fn insert<R: Record>(&mut self, rows: &[R]) -> Result<usize> {
        self.ensure_layer_dir(R::TABLE.layer)?;
        let path = self.table_path(R::TABLE);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_error("open", &path))?;
        let empty = file
            .metadata()
            .map_err(io_error("inspect", &path))?
            .len()
            == 0;
        Self::write_rows(&path, &mut file, rows, empty)?;
        Ok(rows.len())
    }

    fn scan<R: Record>(&self) -> Result<Vec<R>> {
        let path = self.table_path(R::TABLE);
        if !path.is_file() {
            return Err(StoreError::TableMissing { table: R::TABLE });
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .map_err(csv_error(&path))?;
        reader
            .deserialize::<R>()
            .map(|row| row.map_err(csv_error(&path)))
            .collect()
    }

    fn row_count(&self, table: TableRef) -> Result<usize> {
        let path = self.table_path(table);
        if !path.is_file() {
            return Err(StoreError::TableMissing { table });
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .map_err(csv_error(&path))?;
        let mut count = 0usize;
        for record in reader.records() {
            record.map_err(csv_error(&path))?;
            count += 1;
        }
        Ok(count)
    }

    fn replace_atomic<R: Record>(&mut self, rows: &[R]) -> Result<usize> {
        self.ensure_layer_dir(R::TABLE.layer)?;
        let path = self.table_path(R::TABLE);
        Self::write_atomic(&path, |file| Self::write_rows(&path, file, rows, true))?;
        debug!(table = %R::TABLE, rows = rows.len(), "swapped in new table contents");
        Ok(rows.len())
    }

    fn record_manifest(&mut self, entry: ManifestEntry) -> Result<()> {
        let layer = entry.table.layer;
        self.ensure_layer_dir(layer)?;
        let mut entries = self.manifest(layer)?;
        upsert(&mut entries, entry);

        let path = self.manifest_path(layer);
        let json = serde_json::to_vec_pretty(&entries).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        Self::write_atomic(&path, |file| {
            file.write_all(&json).map_err(io_error("write", &path))
        })
    }

    fn manifest(&self, layer: Layer) -> Result<Vec<ManifestEntry>> {
        let path = self.manifest_path(layer);
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&path).map_err(io_error("read", &path))?;
        serde_json::from_str(&text).map_err(|source| StoreError::Json { path, source })
    }
}
