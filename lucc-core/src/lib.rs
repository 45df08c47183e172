//! Core raster transformation pipeline for land-cover carbon accounting.
//!
//! Computes carbon-stock levels and carbon-stock change between two
//! land-cover snapshots of the same area, from per-class carbon-pool values
//! and annual sequestration rates. Land-cover grids are reclassified into
//! continuous carbon values, summed across pools, differenced pixelwise with
//! strict nodata propagation, and the rate difference is integrated over the
//! elapsed years to produce the net-change result.
//!
//! Loading the tabular lookup source, workspace setup and multi-period
//! batching live in the `lucc` crate; this crate owns the raster semantics.

pub mod accumulate;
pub mod aggregate;
pub mod algebra;
pub mod errors;
pub mod lookup;
pub mod pipeline;
pub mod raster;
pub mod reclassify;

pub use accumulate::{accumulate, Period};
pub use aggregate::aggregate_stock;
pub use errors::{LuccError, LuccResult};
pub use lookup::{CarbonPool, LookupTable, PoolTables};
pub use pipeline::{
    run_pipeline, ArtifactRole, ArtifactSink, DiscardArtifacts, PipelineInputs, PipelineOutputs,
};
pub use raster::{ClassRaster, FloatValue, Raster, ValueRaster, DEFAULT_NODATA};
pub use reclassify::reclassify;
