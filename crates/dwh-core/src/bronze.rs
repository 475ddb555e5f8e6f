//! Full load of the bronze layer from staged source files.

use std::time::Instant;

use dwh_ingest::{FromSourceRow, SourceManifest, read_records};
use dwh_model::{
    BronzeCategory, BronzeCustomer, BronzeCustomerDemographic, BronzeLocation, BronzeProduct,
    BronzeSalesDetail, Layer, LayerLoadReport, LoadMode, LoadStage, Record, TableLoadSummary,
    TableRef, duration_ms,
};
use dwh_store::{ManifestEntry, TableStore};
use tracing::{info, info_span, warn};

use crate::context::PipelineContext;
use crate::error::{AtStage, Result};
use crate::progress::LayerRun;

type BronzeStep<S> = fn(&SourceManifest, &mut S, &PipelineContext) -> Result<TableLoadSummary>;

fn steps<S: TableStore>() -> [(TableRef, BronzeStep<S>); 6] {
    [
        (BronzeCustomer::TABLE, load_table::<BronzeCustomer, S>),
        (BronzeProduct::TABLE, load_table::<BronzeProduct, S>),
        (BronzeSalesDetail::TABLE, load_table::<BronzeSalesDetail, S>),
        (
            BronzeCustomerDemographic::TABLE,
            load_table::<BronzeCustomerDemographic, S>,
        ),
        (BronzeLocation::TABLE, load_table::<BronzeLocation, S>),
        (BronzeCategory::TABLE, load_table::<BronzeCategory, S>),
    ]
}

/// Reload every bronze table from its staged file.
///
/// Stops at the first failing table; tables after it keep their previous
/// contents. In two-phase mode the failing table itself may be left empty.
pub fn load_bronze<S: TableStore>(
    manifest: &SourceManifest,
    store: &mut S,
    ctx: &PipelineContext,
) -> LayerLoadReport {
    let _span = info_span!("load_bronze", mode = ?ctx.load_mode).entered();
    let mut run = LayerRun::begin(Layer::Bronze, ctx);
    for (table, step) in steps::<S>() {
        run.enter(table);
        let _table_span = info_span!("table", table = %table).entered();
        match step(manifest, store, ctx) {
            Ok(summary) => run.record(summary),
            Err(err) => return run.fail(err.into_failure(table)),
        }
    }
    run.finish()
}

fn load_table<R: FromSourceRow, S: TableStore>(
    manifest: &SourceManifest,
    store: &mut S,
    ctx: &PipelineContext,
) -> Result<TableLoadSummary> {
    let started = Instant::now();
    let table = R::TABLE;
    let spec = manifest.spec(table.table).at(LoadStage::Read)?;

    let (parsed, rows_out) = match ctx.load_mode {
        LoadMode::TwoPhase => {
            info!(">> Truncating Table: {table}");
            store.truncate(table).at(LoadStage::Truncate)?;
            info!(">> Inserting Data Into: {table}");
            let parsed = read_records::<R>(&spec.path, &spec.options).at(LoadStage::Read)?;
            let rows = store.insert(&parsed.records).at(LoadStage::Insert)?;
            (parsed, rows)
        }
        LoadMode::AtomicSwap => {
            let parsed = read_records::<R>(&spec.path, &spec.options).at(LoadStage::Read)?;
            info!(">> Replacing Table: {table}");
            let rows = store.replace_atomic(&parsed.records).at(LoadStage::Insert)?;
            (parsed, rows)
        }
    };

    if parsed.coerced_fields > 0 {
        warn!(
            cells = parsed.coerced_fields,
            "cells that did not parse as their column type were loaded as NULL"
        );
    }
    if parsed.batch.rows_skipped > 0 {
        info!(
            rows = parsed.batch.rows_skipped,
            max_rows = ?spec.options.max_rows,
            "rows beyond the row cutoff were not loaded"
        );
    }

    store
        .record_manifest(ManifestEntry {
            table,
            rows: rows_out,
            dwh_create_date: ctx.batch_started_at,
            source: Some(parsed.batch.clone()),
        })
        .at(LoadStage::Manifest)?;

    Ok(TableLoadSummary {
        table,
        rows_in: parsed.batch.rows_read,
        rows_out,
        duration_ms: duration_ms(started.elapsed()),
        source: Some(parsed.batch),
    })
}
