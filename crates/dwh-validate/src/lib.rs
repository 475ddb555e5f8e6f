//! Quality checks over the silver layer.
//!
//! Checks read a [`SilverSnapshot`] and report violations as [`Issue`]s
//! grouped per table. Nothing here modifies data, and findings never block
//! a load.

pub mod checks;
pub mod issue;
pub mod report;
pub mod snapshot;
mod validate;

pub use issue::{Category, Issue, Severity};
pub use report::QualityReport;
pub use snapshot::SilverSnapshot;
pub use validate::{ValidationOptions, validate_silver};
