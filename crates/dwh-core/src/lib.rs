//! Layer load orchestration.
//!
//! Tables are loaded strictly one after another in a fixed order. The first
//! failure aborts the rest of the layer and is reported as a
//! [`LoadFailure`](dwh_model::LoadFailure) rather than returned as an error.
//!
//! # Load order
//!
//! 1. `crm_cust_info`
//! 2. `crm_prd_info`
//! 3. `crm_sales_details`
//! 4. `erp_cust_az12`
//! 5. `erp_loc_a101`
//! 6. `erp_px_cat_g1v2`

pub mod bronze;
pub mod context;
pub mod error;
mod progress;
pub mod silver;
pub mod warehouse;

pub use bronze::load_bronze;
pub use context::PipelineContext;
pub use error::{AtStage, DwhError, Result, StageError};
pub use silver::load_silver;
pub use warehouse::load_warehouse;
