//! The storage seam used by the load orchestrator.

use dwh_model::{Layer, Record, TableRef};

use crate::error::Result;
use crate::manifest::ManifestEntry;

/// Storage for warehouse tables.
///
/// A table exists once it has been truncated or written. Truncate followed
/// by insert is two separate steps: a failed insert leaves the table empty.
/// [`replace_atomic`](TableStore::replace_atomic) makes the new contents
/// visible in one step instead.
pub trait TableStore {
    /// Remove all rows, creating the table if needed.
    fn truncate(&mut self, table: TableRef) -> Result<()>;

    /// Append rows to `R::TABLE`; returns the number written.
    fn insert<R: Record>(&mut self, rows: &[R]) -> Result<usize>;

    /// All rows of `R::TABLE` in stored order.
    fn scan<R: Record>(&self) -> Result<Vec<R>>;

    fn row_count(&self, table: TableRef) -> Result<usize>;

    /// Replace the contents of `R::TABLE` in a single step.
    fn replace_atomic<R: Record>(&mut self, rows: &[R]) -> Result<usize>;

    fn record_manifest(&mut self, entry: ManifestEntry) -> Result<()>;

    /// Manifest entries for every loaded table of `layer`, in load order.
    fn manifest(&self, layer: Layer) -> Result<Vec<ManifestEntry>>;

    /// Truncate then insert.
    fn replace<R: Record>(&mut self, rows: &[R]) -> Result<usize> {
        self.truncate(R::TABLE)?;
        self.insert(rows)
    }
}
