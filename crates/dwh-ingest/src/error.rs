//! Error types for source ingestion.

use std::path::PathBuf;

use dwh_model::{ConfigError, TableId};
use thiserror::Error;

/// Errors that can occur while reading a staged source.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}; only UTF-8 is supported")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Record could not be parsed.
    #[error("failed to parse CSV {path} at line {line}: {message}")]
    CsvParse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    // === Configuration Errors ===
    /// Source configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No source is configured for a table.
    #[error("no source configured for {table}")]
    MissingSource { table: TableId },
}

impl IngestError {
    /// Stable numeric code reported in load failures.
    pub fn code(&self) -> u32 {
        match self {
            Self::Config(_) => 1000,
            Self::FileNotFound { .. } => 1001,
            Self::FileRead { .. } => 1002,
            Self::FileTooLarge { .. } => 1003,
            Self::UnsupportedEncoding { .. } => 1004,
            Self::CsvParse { .. } => 1005,
            Self::MissingSource { .. } => 1006,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
