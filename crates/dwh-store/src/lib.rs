//! Persisted warehouse tables.
//!
//! [`TableStore`] is the seam between the load orchestrator and wherever the
//! tables live. Two implementations ship here: [`MemoryStore`] for tests and
//! dry runs, and [`CsvStore`], which keeps one CSV file per table under
//! `<root>/<layer>/`.

pub mod csv_store;
pub mod error;
pub mod manifest;
pub mod memory;
pub mod store;

pub use csv_store::CsvStore;
pub use error::{Result, StoreError};
pub use manifest::ManifestEntry;
pub use memory::MemoryStore;
pub use store::TableStore;
