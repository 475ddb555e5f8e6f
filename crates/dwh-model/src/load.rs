//! Load run reports.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::table::{Layer, TableRef};

/// Step of a table load that was executing when a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStage {
    Read,
    Truncate,
    Insert,
    Manifest,
}

impl LoadStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Truncate => "truncate",
            Self::Insert => "insert",
            Self::Manifest => "manifest",
        }
    }
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured report of a load that aborted.
///
/// `code` is stable per error kind; `state` is the stage that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFailure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableRef>,
    pub message: String,
    pub code: u32,
    pub state: LoadStage,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.table {
            Some(table) => write!(
                f,
                "{table} failed during {} (code {}): {}",
                self.state, self.code, self.message
            ),
            None => write!(
                f,
                "load failed during {} (code {}): {}",
                self.state, self.code, self.message
            ),
        }
    }
}

/// Fingerprint of one staged source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceBatch {
    pub path: PathBuf,
    /// Hex-encoded SHA-256 of the file bytes.
    pub sha256: String,
    pub rows_read: usize,
    /// Data rows beyond the configured row cutoff.
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLoadSummary {
    pub table: TableRef,
    pub rows_in: usize,
    pub rows_out: usize,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceBatch>,
}

/// Outcome of one full-layer load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerLoadReport {
    pub layer: Layer,
    pub started_at: NaiveDateTime,
    pub tables: Vec<TableLoadSummary>,
    pub total_duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<LoadFailure>,
}

impl LayerLoadReport {
    pub fn new(layer: Layer, started_at: NaiveDateTime) -> Self {
        Self {
            layer,
            started_at,
            tables: Vec::new(),
            total_duration_ms: 0,
            failure: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn rows_out(&self) -> usize {
        self.tables.iter().map(|t| t.rows_out).sum()
    }
}

/// Milliseconds of a duration, saturating at `u64::MAX`.
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableId;

    #[test]
    fn failure_display_names_table_and_stage() {
        let failure = LoadFailure {
            table: Some(TableRef::silver(TableId::CrmPrdInfo)),
            message: "disk full".to_string(),
            code: 2001,
            state: LoadStage::Insert,
        };
        assert_eq!(
            failure.to_string(),
            "silver.crm_prd_info failed during insert (code 2001): disk full"
        );
    }

    #[test]
    fn duration_ms_truncates() {
        assert_eq!(duration_ms(Duration::from_micros(2_500)), 2);
    }
}
