//! Bronze then silver in one run.

use dwh_ingest::SourceManifest;
use dwh_model::LayerLoadReport;
use dwh_store::TableStore;
use tracing::warn;

use crate::bronze::load_bronze;
use crate::context::PipelineContext;
use crate::silver::load_silver;

/// Load bronze, then silver if bronze succeeded.
pub fn load_warehouse<S: TableStore>(
    manifest: &SourceManifest,
    store: &mut S,
    ctx: &PipelineContext,
) -> Vec<LayerLoadReport> {
    let bronze = load_bronze(manifest, store, ctx);
    if !bronze.is_success() {
        warn!("bronze load failed, silver layer not loaded");
        return vec![bronze];
    }
    let silver = load_silver(store, ctx);
    vec![bronze, silver]
}
