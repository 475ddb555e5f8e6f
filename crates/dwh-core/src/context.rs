//! Values fixed for the duration of one load run.

use chrono::{NaiveDate, NaiveDateTime};
use dwh_model::{LoadMode, WarehouseConfig};
use dwh_transform::TransformContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineContext {
    /// Birth dates after this day are nulled in silver.
    pub reference_date: NaiveDate,
    pub load_mode: LoadMode,
    /// Recorded as `dwh_create_date` for every table of the run.
    pub batch_started_at: NaiveDateTime,
}

impl PipelineContext {
    /// Two-phase loads, with the reference date taken from `started_at`.
    pub fn new(batch_started_at: NaiveDateTime) -> Self {
        Self {
            reference_date: batch_started_at.date(),
            load_mode: LoadMode::default(),
            batch_started_at,
        }
    }

    /// Context for a run configured by `config`, started at `started_at`.
    pub fn from_config(config: &WarehouseConfig, batch_started_at: NaiveDateTime) -> Self {
        Self {
            reference_date: config
                .reference_date
                .unwrap_or_else(|| batch_started_at.date()),
            load_mode: config.load_mode,
            batch_started_at,
        }
    }

    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = reference_date;
        self
    }

    pub fn with_load_mode(mut self, load_mode: LoadMode) -> Self {
        self.load_mode = load_mode;
        self
    }

    pub fn transform_context(&self) -> TransformContext {
        TransformContext::new(self.reference_date)
    }
}
