//! The per-period carbon stock change pipeline.
//!
//! Sequences reclassification, aggregation, raster algebra and temporal
//! accumulation into the full baseline→alternate→static-diff→rate-diff→
//! accumulate→net-change chain for one time period:
//!
//! 1. Reclassify both land-cover rasters per configured stock pool.
//! 2. Aggregate the per-pool rasters into `stock_baseline` / `stock_alternate`.
//! 3. `change_static = stock_alternate - stock_baseline`.
//! 4. Reclassify both land-cover rasters with the rate table.
//! 5. `delta_rate = rate_alternate - rate_baseline`.
//! 6. `change_accumulated = delta_rate * duration`.
//! 7. `change_net = change_static + change_accumulated`.
//!
//! The chain is strictly sequential with a linear data dependency; the first
//! failing step aborts the run and nothing is retried. Each artifact is handed
//! to the [`ArtifactSink`] as soon as its producing step completes, so
//! artifacts from completed steps survive a later failure. The pipeline is
//! deliberately not transactional.

use crate::accumulate::{accumulate, Period};
use crate::aggregate::aggregate_stock;
use crate::algebra::{difference, sum};
use crate::errors::LuccResult;
use crate::lookup::PoolTables;
use crate::raster::{ClassRaster, FloatValue, ValueRaster};
use crate::reclassify::reclassify;
use log::debug;

/// Output artifact name for the baseline total stock.
pub const STOCK_BASELINE: &str = "stock_baseline";
/// Output artifact name for the alternate total stock.
pub const STOCK_ALTERNATE: &str = "stock_alternate";
/// Output artifact name for the static stock difference.
pub const CHANGE_STATIC: &str = "change_static";
/// Output artifact name for the accumulated rate difference.
pub const CHANGE_ACCUMULATED: &str = "change_accumulated";
/// Output artifact name for the net change.
pub const CHANGE_NET: &str = "change_net";

/// Intermediate artifact name for the baseline rate raster.
pub const RATE_BASELINE: &str = "rate_bas";
/// Intermediate artifact name for the alternate rate raster.
pub const RATE_ALTERNATE: &str = "rate_alt";
/// Intermediate artifact name for the rate difference raster.
pub const DELTA_RATE: &str = "delta_rate";

/// Whether an artifact is an intermediate or a named output of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    Intermediate,
    Output,
}

/// Receiver for rasters as the pipeline produces them.
///
/// The orchestrator hands over each artifact immediately after the step that
/// produced it, one stage's artifacts before the next stage starts. A failing
/// persist aborts the run like any other error.
pub trait ArtifactSink {
    fn persist(
        &mut self,
        name: &str,
        role: ArtifactRole,
        raster: &ValueRaster,
    ) -> LuccResult<()>;
}

/// Sink that keeps nothing, for purely in-memory runs.
#[derive(Debug, Default)]
pub struct DiscardArtifacts;

impl ArtifactSink for DiscardArtifacts {
    fn persist(&mut self, _: &str, _: ArtifactRole, _: &ValueRaster) -> LuccResult<()> {
        Ok(())
    }
}

/// Inputs to one period's pipeline run.
#[derive(Debug)]
pub struct PipelineInputs<'a> {
    /// Land-cover raster at the period start.
    pub lulc_baseline: &'a ClassRaster,
    /// Land-cover raster at the period end.
    pub lulc_alternate: &'a ClassRaster,
    /// Stock and rate lookup tables.
    pub tables: &'a PoolTables,
    /// The period spanned by the two snapshots.
    pub period: Period,
    /// Nodata sentinel for every derived raster.
    pub nodata: FloatValue,
}

/// The five named outputs of one period's run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutputs {
    pub stock_baseline: ValueRaster,
    pub stock_alternate: ValueRaster,
    pub change_static: ValueRaster,
    pub change_accumulated: ValueRaster,
    pub change_net: ValueRaster,
}

/// Execute the full pipeline for one period.
///
/// Each stock pool is reclassified independently per land-cover raster; the
/// same source raster is reused across all pools of one time point, so a
/// single combined pass would be output-equivalent, but the per-pool passes
/// keep every intermediate individually addressable.
pub fn run_pipeline(
    inputs: &PipelineInputs<'_>,
    sink: &mut dyn ArtifactSink,
) -> LuccResult<PipelineOutputs> {
    let nodata = inputs.nodata;

    // 1. Per-pool reclassification of both snapshots.
    let mut pools_baseline = Vec::with_capacity(inputs.tables.stocks.len());
    let mut pools_alternate = Vec::with_capacity(inputs.tables.stocks.len());
    for (pool, table) in &inputs.tables.stocks {
        debug!("reclassifying pool {pool}");
        let baseline = reclassify(inputs.lulc_baseline, table, nodata)?;
        sink.persist(
            &format!("{pool}_bas"),
            ArtifactRole::Intermediate,
            &baseline,
        )?;
        pools_baseline.push(baseline);

        let alternate = reclassify(inputs.lulc_alternate, table, nodata)?;
        sink.persist(
            &format!("{pool}_alt"),
            ArtifactRole::Intermediate,
            &alternate,
        )?;
        pools_alternate.push(alternate);
    }

    // 2. Total stock per snapshot.
    let stock_baseline = aggregate_stock(&pools_baseline, nodata)?;
    sink.persist(STOCK_BASELINE, ArtifactRole::Output, &stock_baseline)?;
    let stock_alternate = aggregate_stock(&pools_alternate, nodata)?;
    sink.persist(STOCK_ALTERNATE, ArtifactRole::Output, &stock_alternate)?;

    // 3. Static stock difference.
    let change_static = difference(&stock_alternate, &stock_baseline, nodata)?;
    sink.persist(CHANGE_STATIC, ArtifactRole::Output, &change_static)?;

    // 4. Rate reclassification of both snapshots.
    let rate_baseline = reclassify(inputs.lulc_baseline, &inputs.tables.rate, nodata)?;
    sink.persist(RATE_BASELINE, ArtifactRole::Intermediate, &rate_baseline)?;
    let rate_alternate = reclassify(inputs.lulc_alternate, &inputs.tables.rate, nodata)?;
    sink.persist(RATE_ALTERNATE, ArtifactRole::Intermediate, &rate_alternate)?;

    // 5. Rate difference.
    let delta_rate = difference(&rate_alternate, &rate_baseline, nodata)?;
    sink.persist(DELTA_RATE, ArtifactRole::Intermediate, &delta_rate)?;

    // 6. Accumulation over the period.
    let change_accumulated = accumulate(&delta_rate, inputs.period, nodata)?;
    sink.persist(CHANGE_ACCUMULATED, ArtifactRole::Output, &change_accumulated)?;

    // 7. Net change.
    let change_net = sum(&change_static, &change_accumulated, nodata)?;
    sink.persist(CHANGE_NET, ArtifactRole::Output, &change_net)?;

    Ok(PipelineOutputs {
        stock_baseline,
        stock_alternate,
        change_static,
        change_accumulated,
        change_net,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LuccError;
    use crate::lookup::{CarbonPool, LookupTable};
    use crate::raster::DEFAULT_NODATA;
    use approx::assert_relative_eq;
    use ndarray::array;
    use std::collections::HashMap;

    const ND: FloatValue = DEFAULT_NODATA;

    fn scenario_tables() -> PoolTables {
        PoolTables {
            stocks: vec![
                (
                    CarbonPool::Above,
                    LookupTable::new("c_above", HashMap::from([(1, 10.0), (2, 20.0)])),
                ),
                (
                    CarbonPool::Below,
                    LookupTable::new("c_below", HashMap::from([(1, 5.0), (2, 8.0)])),
                ),
            ],
            rate: LookupTable::new("c_sequestration", HashMap::from([(1, 0.5), (2, 0.8)])),
        }
    }

    #[test]
    fn static_stock_scenario() {
        let baseline = ClassRaster::new(array![[1, 2], [2, 1]], 0);
        let alternate = ClassRaster::new(array![[2, 2], [1, 1]], 0);
        let tables = scenario_tables();
        let inputs = PipelineInputs {
            lulc_baseline: &baseline,
            lulc_alternate: &alternate,
            tables: &tables,
            period: Period::new(2009, 2024).unwrap(),
            nodata: ND,
        };

        let outputs = run_pipeline(&inputs, &mut DiscardArtifacts).unwrap();
        assert_eq!(
            outputs.stock_baseline.data(),
            &array![[15.0, 28.0], [28.0, 15.0]]
        );
        assert_eq!(
            outputs.stock_alternate.data(),
            &array![[28.0, 28.0], [15.0, 15.0]]
        );
        assert_eq!(
            outputs.change_static.data(),
            &array![[13.0, 0.0], [-13.0, 0.0]]
        );
    }

    #[test]
    fn net_change_identity() {
        let baseline = ClassRaster::new(array![[1, 2], [2, 1]], 0);
        let alternate = ClassRaster::new(array![[2, 2], [1, 1]], 0);
        let tables = scenario_tables();
        let inputs = PipelineInputs {
            lulc_baseline: &baseline,
            lulc_alternate: &alternate,
            tables: &tables,
            period: Period::new(2009, 2024).unwrap(),
            nodata: ND,
        };

        let outputs = run_pipeline(&inputs, &mut DiscardArtifacts).unwrap();
        for ((r, c), &net) in outputs.change_net.data().indexed_iter() {
            assert_relative_eq!(
                net,
                outputs.change_static.get(r, c) + outputs.change_accumulated.get(r, c),
                epsilon = 1e-12
            );
        }
        // (0.8 - 0.5) * 15 at every changed pixel.
        assert_relative_eq!(outputs.change_accumulated.get(0, 0), 4.5, epsilon = 1e-12);
        assert_relative_eq!(outputs.change_net.get(0, 0), 17.5, epsilon = 1e-12);
    }

    #[test]
    fn nodata_propagates_through_every_output() {
        let baseline = ClassRaster::new(array![[1, 0], [2, 1]], 0);
        let alternate = ClassRaster::new(array![[2, 2], [0, 1]], 0);
        let tables = scenario_tables();
        let inputs = PipelineInputs {
            lulc_baseline: &baseline,
            lulc_alternate: &alternate,
            tables: &tables,
            period: Period::new(2009, 2024).unwrap(),
            nodata: ND,
        };

        let outputs = run_pipeline(&inputs, &mut DiscardArtifacts).unwrap();
        // (0,1) is nodata in the baseline, (1,0) in the alternate; both must be
        // masked in every raster that combines the two snapshots.
        for raster in [
            &outputs.change_static,
            &outputs.change_accumulated,
            &outputs.change_net,
        ] {
            assert!(raster.is_nodata(raster.get(0, 1)));
            assert!(raster.is_nodata(raster.get(1, 0)));
            assert!(!raster.is_nodata(raster.get(0, 0)));
            assert!(!raster.is_nodata(raster.get(1, 1)));
        }
        assert!(outputs.stock_baseline.is_nodata(outputs.stock_baseline.get(0, 1)));
        assert!(outputs.stock_alternate.is_nodata(outputs.stock_alternate.get(1, 0)));
    }

    #[test]
    fn unmapped_code_aborts_the_run() {
        let baseline = ClassRaster::new(array![[1, 9]], 0);
        let alternate = ClassRaster::new(array![[1, 1]], 0);
        let tables = scenario_tables();
        let inputs = PipelineInputs {
            lulc_baseline: &baseline,
            lulc_alternate: &alternate,
            tables: &tables,
            period: Period::new(2009, 2024).unwrap(),
            nodata: ND,
        };

        let result = run_pipeline(&inputs, &mut DiscardArtifacts);
        assert!(matches!(result, Err(LuccError::Lookup { code: 9, .. })));
    }

    #[test]
    fn mismatched_snapshots_abort_the_run() {
        let baseline = ClassRaster::new(array![[1, 2]], 0);
        let alternate = ClassRaster::new(array![[1], [2]], 0);
        let tables = scenario_tables();
        let inputs = PipelineInputs {
            lulc_baseline: &baseline,
            lulc_alternate: &alternate,
            tables: &tables,
            period: Period::new(2009, 2024).unwrap(),
            nodata: ND,
        };

        let result = run_pipeline(&inputs, &mut DiscardArtifacts);
        assert!(matches!(result, Err(LuccError::ShapeMismatch { .. })));
    }

    #[test]
    fn artifacts_arrive_in_stage_order() {
        struct Recorder(Vec<(String, ArtifactRole)>);
        impl ArtifactSink for Recorder {
            fn persist(
                &mut self,
                name: &str,
                role: ArtifactRole,
                _: &ValueRaster,
            ) -> LuccResult<()> {
                self.0.push((name.to_string(), role));
                Ok(())
            }
        }

        let baseline = ClassRaster::new(array![[1]], 0);
        let alternate = ClassRaster::new(array![[2]], 0);
        let tables = scenario_tables();
        let inputs = PipelineInputs {
            lulc_baseline: &baseline,
            lulc_alternate: &alternate,
            tables: &tables,
            period: Period::new(2009, 2024).unwrap(),
            nodata: ND,
        };

        let mut recorder = Recorder(Vec::new());
        run_pipeline(&inputs, &mut recorder).unwrap();

        let names: Vec<&str> = recorder.0.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "c_above_bas",
                "c_above_alt",
                "c_below_bas",
                "c_below_alt",
                STOCK_BASELINE,
                STOCK_ALTERNATE,
                CHANGE_STATIC,
                RATE_BASELINE,
                RATE_ALTERNATE,
                DELTA_RATE,
                CHANGE_ACCUMULATED,
                CHANGE_NET,
            ]
        );
        assert!(recorder
            .0
            .iter()
            .filter(|(_, role)| *role == ArtifactRole::Output)
            .count()
            == 5);
    }
}
