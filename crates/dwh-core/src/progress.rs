//! Progress log and bookkeeping for one layer run.

use std::time::Instant;

use dwh_model::{
    Layer, LayerLoadReport, LoadFailure, SourceSystem, TableLoadSummary, TableRef, duration_ms,
};
use tracing::{error, info};

use crate::context::PipelineContext;

pub(crate) struct LayerRun {
    report: LayerLoadReport,
    started: Instant,
    section: Option<SourceSystem>,
}

impl LayerRun {
    pub(crate) fn begin(layer: Layer, ctx: &PipelineContext) -> Self {
        info!(layer = layer.as_str(), "Loading {} Layer", layer.label());
        Self {
            report: LayerLoadReport::new(layer, ctx.batch_started_at),
            started: Instant::now(),
            section: None,
        }
    }

    /// Log a section header whenever the source system changes.
    pub(crate) fn enter(&mut self, table: TableRef) {
        let system = table.table.source_system();
        if self.section != Some(system) {
            info!("Loading {} Tables", system.as_str());
            self.section = Some(system);
        }
    }

    pub(crate) fn record(&mut self, summary: TableLoadSummary) {
        info!(
            table = %summary.table,
            rows = summary.rows_out,
            duration_ms = summary.duration_ms,
            ">> Load Duration: {} ms",
            summary.duration_ms
        );
        self.report.tables.push(summary);
    }

    pub(crate) fn fail(mut self, failure: LoadFailure) -> LayerLoadReport {
        self.report.total_duration_ms = duration_ms(self.started.elapsed());
        let layer = self.report.layer.label().to_uppercase();
        error!("Error occurred during loading {layer} layer");
        error!(
            table = ?failure.table.map(|t| t.to_string()),
            "Error Message: {}",
            failure.message
        );
        error!("Error Number: {}", failure.code);
        error!("Error State: {}", failure.state);
        self.report.failure = Some(failure);
        self.report
    }

    pub(crate) fn finish(mut self) -> LayerLoadReport {
        self.report.total_duration_ms = duration_ms(self.started.elapsed());
        info!(
            layer = self.report.layer.as_str(),
            tables = self.report.tables.len(),
            rows = self.report.rows_out(),
            "Loading {} Layer is Completed",
            self.report.layer.label()
        );
        info!(
            "   - Total Load Duration: {} ms",
            self.report.total_duration_ms
        );
        self.report
    }
}
