//! Source reading for the bronze layer.
//!
//! Staged delimited-text files are read with an explicit delimiter, header
//! row count and optional row cutoff, then mapped positionally onto bronze
//! records. Field-level problems never fail a batch: a cell that does not
//! parse as its column type becomes `None`.

pub mod error;
pub mod fields;
pub mod fingerprint;
pub mod manifest;
pub mod reader;
pub mod rows;

pub use error::{IngestError, Result};
pub use fields::FieldCursor;
pub use fingerprint::sha256_hex;
pub use manifest::{SourceManifest, SourceSpec};
pub use reader::{CsvOptions, MAX_SOURCE_FILE_SIZE, SourceRow, SourceTable, read_source};
pub use rows::{FromSourceRow, ParsedBatch, parse_rows, read_records};
