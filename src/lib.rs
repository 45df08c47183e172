//! Carbon stock and stock-change accounting over land-cover rasters.
//!
//! The raster semantics live in [`lucc_core`]; this crate supplies the outer
//! shell: lookup-table loading, workspace layout, per-period execution and
//! multi-period batch runs.

pub mod run;
pub mod tables;
pub mod workspace;

pub use lucc_core::{
    accumulate, aggregate_stock, reclassify, run_pipeline, ArtifactRole, ArtifactSink,
    CarbonPool, ClassRaster, DiscardArtifacts, FloatValue, LookupTable, LuccError, LuccResult,
    Period, PipelineInputs, PipelineOutputs, PoolTables, Raster, ValueRaster, DEFAULT_NODATA,
};
pub use run::{run_batch, run_period, PeriodSpec, RunArgs, RunPlan};
pub use tables::{load_pool_tables, parse_pool_tables};
pub use workspace::Workspace;
