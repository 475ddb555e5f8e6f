//! Provenance of loaded tables.

use chrono::NaiveDateTime;
use dwh_model::{SourceBatch, TableRef};
use serde::{Deserialize, Serialize};

/// What was last loaded into a table and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub table: TableRef,
    pub rows: usize,
    /// Start of the run that produced the current contents.
    pub dwh_create_date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceBatch>,
}

/// Insert or replace the entry for `entry.table`, keeping load order.
pub(crate) fn upsert(entries: &mut Vec<ManifestEntry>, entry: ManifestEntry) {
    entries.retain(|existing| existing.table != entry.table);
    entries.push(entry);
    entries.sort_by_key(|e| e.table);
}
