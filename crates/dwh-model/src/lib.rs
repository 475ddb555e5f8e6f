//! Core types for the bronze/silver warehouse loader.
//!
//! Table identifiers, raw and normalized record shapes, load reports and
//! configuration. Nothing here performs I/O except reading a config file.

pub mod bronze;
pub mod category;
pub mod config;
pub mod error;
pub mod load;
pub mod record;
pub mod silver;
pub mod table;

pub use bronze::{
    BronzeCategory, BronzeCustomer, BronzeCustomerDemographic, BronzeLocation, BronzeProduct,
    BronzeSalesDetail,
};
pub use category::{Gender, MaritalStatus, NOT_AVAILABLE, ProductLine};
pub use config::{LoadMode, SourceOverride, WarehouseConfig};
pub use error::{ConfigError, Result};
pub use load::{
    LayerLoadReport, LoadFailure, LoadStage, SourceBatch, TableLoadSummary, duration_ms,
};
pub use record::Record;
pub use silver::{
    SalesKey, SilverCategory, SilverCustomer, SilverCustomerDemographic, SilverLocation,
    SilverProduct, SilverSalesDetail,
};
pub use table::{Layer, SourceSystem, TableId, TableRef};
