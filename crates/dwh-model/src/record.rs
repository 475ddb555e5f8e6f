//! Row types that can be persisted to a warehouse table.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::table::TableRef;

/// A row of one warehouse table.
///
/// `COLUMNS` lists the persisted column names in field order; stores use it
/// for headers so field names stay stable for downstream consumers.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TABLE: TableRef;
    const COLUMNS: &'static [&'static str];
}
