//! Bronze to silver transformation rules.
//!
//! Everything here is a pure function over in-memory records:
//!
//! - [`normalize`]: trimming and explicit code-table lookups
//! - [`dedupe`]: keep the most recent record per natural key
//! - [`derive`]: validity end dates and sales reconciliation
//! - [`dates`]: `YYYYMMDD` integer date codes
//! - [`tables`]: one [`TableTransform`] per silver table

pub mod dates;
pub mod dedupe;
pub mod derive;
pub mod normalize;
pub mod tables;

pub use dates::date_from_code;
pub use dedupe::{DedupeOutcome, latest_per_key};
pub use derive::{Lookahead, SalesAmounts, derive_end_dates, reconcile_sales, with_next};
pub use normalize::{CodeTable, country_name, trim_text};
pub use tables::{
    CategoryTransform, CustomerTransform, DemographicTransform, LocationTransform,
    ProductTransform, SalesTransform, TableTransform, TransformContext,
};
