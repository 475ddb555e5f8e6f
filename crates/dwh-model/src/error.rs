//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a [`WarehouseConfig`](crate::WarehouseConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected shape.
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Delimiter must be a single ASCII byte.
    #[error("delimiter for {table} must be a single ASCII character, got '{value}'")]
    InvalidDelimiter { table: String, value: String },

    /// Config names a table that does not exist.
    #[error("unknown table '{name}' in config")]
    UnknownTable { name: String },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
