//! In-memory table store.

use std::any::Any;
use std::collections::HashMap;

use dwh_model::{Layer, Record, TableRef};

use crate::error::{Result, StoreError};
use crate::manifest::{ManifestEntry, upsert};
use crate::store::TableStore;

/// One table's rows, type-erased. `rows` is `None` until the first insert.
#[derive(Default)]
struct Slot {
    rows: Option<Box<dyn Any + Send + Sync>>,
    len: usize,
}

impl Slot {
    fn holding<R: Record>(rows: &[R]) -> Self {
        Self {
            rows: Some(Box::new(rows.to_vec())),
            len: rows.len(),
        }
    }
}

/// Tables held as typed vectors in memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: HashMap<TableRef, Slot>,
    manifests: HashMap<Layer, Vec<ManifestEntry>>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tables: Vec<_> = self
            .tables
            .iter()
            .map(|(table, slot)| format!("{table} ({} rows)", slot.len))
            .collect();
        tables.sort();
        f.debug_struct("MemoryStore").field("tables", &tables).finish()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, table: TableRef) -> bool {
        self.tables.contains_key(&table)
    }
}

impl TableStore for MemoryStore {
    fn truncate(&mut self, table: TableRef) -> Result<()> {
        self.tables.insert(table, Slot::default());
        Ok(())
    }

    fn insert<R: Record>(&mut self, rows: &[R]) -> Result<usize> {
        let slot = self.tables.entry(R::TABLE).or_default();
        if let Some(existing) = slot.rows.as_mut() {
            existing
                .downcast_mut::<Vec<R>>()
                .ok_or(StoreError::TypeMismatch { table: R::TABLE })?
                .extend_from_slice(rows);
            slot.len += rows.len();
        } else {
            *slot = Slot::holding(rows);
        }
        Ok(rows.len())
    }

    fn scan<R: Record>(&self) -> Result<Vec<R>> {
        let slot = self
            .tables
            .get(&R::TABLE)
            .ok_or(StoreError::TableMissing { table: R::TABLE })?;
        match &slot.rows {
            None => Ok(Vec::new()),
            Some(rows) => rows
                .downcast_ref::<Vec<R>>()
                .cloned()
                .ok_or(StoreError::TypeMismatch { table: R::TABLE }),
        }
    }

    fn row_count(&self, table: TableRef) -> Result<usize> {
        self.tables
            .get(&table)
            .map(|slot| slot.len)
            .ok_or(StoreError::TableMissing { table })
    }

    fn replace_atomic<R: Record>(&mut self, rows: &[R]) -> Result<usize> {
        self.tables.insert(R::TABLE, Slot::holding(rows));
        Ok(rows.len())
    }

    fn record_manifest(&mut self, entry: ManifestEntry) -> Result<()> {
        upsert(self.manifests.entry(entry.table.layer).or_default(), entry);
        Ok(())
    }

    fn manifest(&self, layer: Layer) -> Result<Vec<ManifestEntry>> {
        Ok(self.manifests.get(&layer).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwh_model::{BronzeLocation, SilverLocation, TableId};

    fn location(cid: &str) -> BronzeLocation {
        BronzeLocation {
            cid: Some(cid.to_string()),
            cntry: Some("DE".to_string()),
        }
    }

    #[test]
    fn truncate_then_insert_appends() {
        let mut store = MemoryStore::new();
        store.truncate(BronzeLocation::TABLE).unwrap();
        assert_eq!(store.scan::<BronzeLocation>().unwrap(), Vec::new());
        store.insert(&[location("A")]).unwrap();
        store.insert(&[location("B")]).unwrap();
        assert_eq!(store.row_count(BronzeLocation::TABLE).unwrap(), 2);
        store.truncate(BronzeLocation::TABLE).unwrap();
        assert_eq!(store.row_count(BronzeLocation::TABLE).unwrap(), 0);
    }

    #[test]
    fn scanning_unknown_table_fails() {
        let store = MemoryStore::new();
        let err = store.scan::<SilverLocation>().unwrap_err();
        assert!(matches!(err, StoreError::TableMissing { .. }));
        assert_eq!(
            err.to_string(),
            format!("table {} has not been loaded", TableRef::silver(TableId::ErpLocA101))
        );
    }

    #[test]
    fn atomic_replace_swaps_contents() {
        let mut store = MemoryStore::new();
        store.insert(&[location("A"), location("B")]).unwrap();
        store.replace_atomic(&[location("C")]).unwrap();
        let rows = store.scan::<BronzeLocation>().unwrap();
        assert_eq!(rows, vec![location("C")]);
    }
}
