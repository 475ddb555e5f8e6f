//! Delimited-text reading with explicit header row and row cutoff.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::fingerprint::sha256_hex;

/// Maximum source file size (500 MB default).
pub const MAX_SOURCE_FILE_SIZE: u64 = 500 * 1024 * 1024;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// How a staged file is split into rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Leading records skipped before data rows.
    pub header_rows: usize,
    /// Stop after this many data rows.
    pub max_rows: Option<usize>,
    pub max_file_size: u64,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            header_rows: 1,
            max_rows: None,
            max_file_size: MAX_SOURCE_FILE_SIZE,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows;
        self
    }

    pub fn with_max_rows(mut self, rows: Option<usize>) -> Self {
        self.max_rows = rows;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}

/// One data row with its 1-based line number in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub line: u64,
    pub fields: Vec<String>,
    /// Cells that were not valid UTF-8; each is kept as an empty cell.
    pub undecodable: Vec<usize>,
}

impl SourceRow {
    fn decode(line: u64, record: &csv::ByteRecord) -> Self {
        let mut undecodable = Vec::new();
        let fields = record
            .iter()
            .enumerate()
            .map(|(index, cell)| match std::str::from_utf8(cell) {
                Ok(text) => text.to_string(),
                Err(_) => {
                    undecodable.push(index);
                    String::new()
                }
            })
            .collect();
        Self {
            line,
            fields,
            undecodable,
        }
    }
}

/// Rows of one staged file plus what is needed to fingerprint the batch.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub path: PathBuf,
    pub rows: Vec<SourceRow>,
    /// Data rows dropped by the row cutoff.
    pub rows_skipped: usize,
    pub sha256: String,
}

fn read_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| read_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Reject UTF-16 byte order marks; a UTF-8 BOM is accepted.
pub fn validate_encoding(path: &Path, bytes: &[u8]) -> Result<()> {
    match bytes {
        [0xFF, 0xFE, ..] => Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        }),
        [0xFE, 0xFF, ..] => Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        }),
        _ => Ok(()),
    }
}

/// Read a staged file into rows.
///
/// Rows may be shorter or longer than the table's column list; the row
/// mapping treats missing cells as empty and ignores extras. A cell that is
/// not valid UTF-8 is read as empty and reported in
/// [`SourceRow::undecodable`]. Rows past the cutoff are counted only.
pub fn read_source(path: &Path, options: &CsvOptions) -> Result<SourceTable> {
    check_file_size(path, options.max_file_size)?;
    let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
    validate_encoding(path, &bytes)?;
    let sha256 = sha256_hex(&bytes);
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(content);

    let mut rows = Vec::new();
    let mut rows_skipped = 0usize;
    for (index, result) in reader.byte_records().enumerate() {
        let record = result.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            line: e.position().map_or(0, csv::Position::line),
            message: e.to_string(),
        })?;
        if index < options.header_rows {
            continue;
        }
        if options.max_rows.is_some_and(|max| rows.len() >= max) {
            rows_skipped += 1;
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        rows.push(SourceRow::decode(line, &record));
    }

    debug!(
        path = %path.display(),
        rows = rows.len(),
        skipped = rows_skipped,
        "read source file"
    );

    Ok(SourceTable {
        path: path.to_path_buf(),
        rows,
        rows_skipped,
        sha256,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn skips_header_and_strips_bom() {
        let file = write_temp(b"\xEF\xBB\xBFid,name\n1,Ann\n2,Bob\n");
        let table = read_source(file.path(), &CsvOptions::default()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].fields, vec!["1", "Ann"]);
        assert_eq!(table.rows[0].line, 2);
    }

    #[test]
    fn invalid_utf8_cell_is_emptied() {
        let file = write_temp(b"CID,CNTRY\nAW-1,DE\nAW-2,Espa\xF1a\nAW-3,US\n");
        let table = read_source(file.path(), &CsvOptions::default()).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1].fields, vec!["AW-2", ""]);
        assert_eq!(table.rows[1].undecodable, vec![1]);
        assert!(table.rows[0].undecodable.is_empty());
        assert_eq!(table.rows[2].fields, vec!["AW-3", "US"]);
    }

    #[test]
    fn rows_past_cutoff_are_not_decoded() {
        let file = write_temp(b"CID,CNTRY\nAW-1,DE\nAW-2,Espa\xF1a\nAW-3,US\n");
        let options = CsvOptions::default().with_max_rows(Some(1));
        let table = read_source(file.path(), &options).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows_skipped, 2);
        assert!(table.rows[0].undecodable.is_empty());
    }

    #[test]
    fn utf16_is_rejected() {
        let file = write_temp(&[0xFF, 0xFE, b'a', 0]);
        let err = read_source(file.path(), &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedEncoding { .. }));
    }

    #[test]
    fn size_limit_is_enforced() {
        let file = write_temp(b"id\n1\n2\n3\n");
        let options = CsvOptions::default().with_max_file_size(4);
        let err = read_source(file.path(), &options).unwrap_err();
        assert!(matches!(err, IngestError::FileTooLarge { .. }));
    }

    #[test]
    fn missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source(&dir.path().join("nope.csv"), &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
