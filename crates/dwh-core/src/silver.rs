//! Full load of the silver layer from bronze.

use std::time::Instant;

use dwh_model::{
    Layer, LayerLoadReport, LoadMode, LoadStage, Record, TableLoadSummary, TableRef, duration_ms,
};
use dwh_store::{ManifestEntry, TableStore};
use dwh_transform::{
    CategoryTransform, CustomerTransform, DemographicTransform, LocationTransform,
    ProductTransform, SalesTransform, TableTransform,
};
use tracing::{debug, info, info_span};

use crate::context::PipelineContext;
use crate::error::{AtStage, Result};
use crate::progress::LayerRun;

type SilverStep<S> = fn(&mut S, &PipelineContext) -> Result<TableLoadSummary>;

fn target<T: TableTransform>() -> TableRef {
    <T::Output as Record>::TABLE
}

fn steps<S: TableStore>() -> [(TableRef, SilverStep<S>); 6] {
    [
        (target::<CustomerTransform>(), load_table::<CustomerTransform, S>),
        (target::<ProductTransform>(), load_table::<ProductTransform, S>),
        (target::<SalesTransform>(), load_table::<SalesTransform, S>),
        (
            target::<DemographicTransform>(),
            load_table::<DemographicTransform, S>,
        ),
        (target::<LocationTransform>(), load_table::<LocationTransform, S>),
        (target::<CategoryTransform>(), load_table::<CategoryTransform, S>),
    ]
}

/// Rebuild every silver table from the current bronze contents.
///
/// Same abort rules as [`load_bronze`](crate::load_bronze).
pub fn load_silver<S: TableStore>(store: &mut S, ctx: &PipelineContext) -> LayerLoadReport {
    let _span = info_span!("load_silver", mode = ?ctx.load_mode).entered();
    let mut run = LayerRun::begin(Layer::Silver, ctx);
    for (table, step) in steps::<S>() {
        run.enter(table);
        let _table_span = info_span!("table", table = %table).entered();
        match step(store, ctx) {
            Ok(summary) => run.record(summary),
            Err(err) => return run.fail(err.into_failure(table)),
        }
    }
    run.finish()
}

fn load_table<T: TableTransform + Default, S: TableStore>(
    store: &mut S,
    ctx: &PipelineContext,
) -> Result<TableLoadSummary> {
    let started = Instant::now();
    let table = target::<T>();
    let transform = T::default();
    let transform_ctx = ctx.transform_context();

    let (rows_in, rows_out) = match ctx.load_mode {
        LoadMode::TwoPhase => {
            info!(">> Truncating Table: {table}");
            store.truncate(table).at(LoadStage::Truncate)?;
            info!(">> Inserting Data Into: {table}");
            let input = store.scan::<T::Input>().at(LoadStage::Read)?;
            let rows_in = input.len();
            let output = transform.transform(input, &transform_ctx);
            (rows_in, store.insert(&output).at(LoadStage::Insert)?)
        }
        LoadMode::AtomicSwap => {
            let input = store.scan::<T::Input>().at(LoadStage::Read)?;
            let rows_in = input.len();
            let output = transform.transform(input, &transform_ctx);
            info!(">> Replacing Table: {table}");
            (rows_in, store.replace_atomic(&output).at(LoadStage::Insert)?)
        }
    };
    debug!(rows_in, rows_out, "transformed");

    store
        .record_manifest(ManifestEntry {
            table,
            rows: rows_out,
            dwh_create_date: ctx.batch_started_at,
            source: None,
        })
        .at(LoadStage::Manifest)?;

    Ok(TableLoadSummary {
        table,
        rows_in,
        rows_out,
        duration_ms: duration_ms(started.elapsed()),
        source: None,
    })
}
