//! Store error types.

use std::path::PathBuf;

use dwh_model::TableRef;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Row could not be written or read as CSV.
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Manifest could not be encoded or decoded.
    #[error("manifest error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// New table contents could not be swapped in.
    #[error("failed to swap {temp_path} into {target_path}: {source}")]
    AtomicSwapFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table has never been created.
    #[error("table {table} has not been loaded")]
    TableMissing { table: TableRef },

    /// Table holds rows of a different record type.
    #[error("table {table} holds a different record type")]
    TypeMismatch { table: TableRef },

    /// Store refused the write.
    #[error("write to {table} rejected: {message}")]
    Rejected { table: TableRef, message: String },
}

impl StoreError {
    /// Stable numeric code reported in load failures.
    pub fn code(&self) -> u32 {
        match self {
            Self::Io { .. } => 2001,
            Self::Csv { .. } => 2002,
            Self::Json { .. } => 2003,
            Self::AtomicSwapFailed { .. } => 2004,
            Self::TableMissing { .. } => 2005,
            Self::TypeMismatch { .. } => 2006,
            Self::Rejected { .. } => 2007,
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
