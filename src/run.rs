//! Per-period and multi-period run drivers.
//!
//! [`run_period`] is the outer shell around the core pipeline for one
//! `(baseline, alternate)` snapshot pair: it validates the input references,
//! sets up the workspace, loads the land-cover rasters and lookup tables,
//! executes the pipeline and persists every artifact. [`run_batch`] iterates
//! an ordered list of periods, each into its own workspace; the core itself
//! has no notion of a "next period".

use crate::tables::load_pool_tables;
use crate::workspace::Workspace;
use log::info;
use lucc_core::accumulate::Period;
use lucc_core::errors::{LuccError, LuccResult};
use lucc_core::pipeline::{run_pipeline, PipelineInputs, PipelineOutputs};
use lucc_core::raster::{ClassRaster, FloatValue, DEFAULT_NODATA};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs for one period's run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunArgs {
    /// Output directory for this period's artifacts.
    pub workspace_dir: PathBuf,
    /// Land-cover raster at the period start.
    pub lulc_baseline_path: PathBuf,
    /// Land-cover raster at the period end.
    pub lulc_alternate_path: PathBuf,
    /// Semicolon-delimited carbon pool table.
    pub carbon_pools_path: PathBuf,
    /// Year of the baseline snapshot.
    pub start_year: i32,
    /// Year of the alternate snapshot.
    pub end_year: i32,
}

impl RunArgs {
    fn require_file(path: &Path, what: &str) -> LuccResult<()> {
        if !path.is_file() {
            return Err(LuccError::Config(format!(
                "{what} does not exist: {}",
                path.display()
            )));
        }
        Ok(())
    }

    /// Check that every referenced input file exists.
    pub fn validate(&self) -> LuccResult<()> {
        Self::require_file(&self.lulc_baseline_path, "baseline land-cover raster")?;
        Self::require_file(&self.lulc_alternate_path, "alternate land-cover raster")?;
        Self::require_file(&self.carbon_pools_path, "carbon pools table")?;
        Ok(())
    }
}

/// Execute the pipeline for one period and persist its artifacts.
///
/// The first failing validation or stage aborts the run; artifacts already
/// written by completed stages are left in the workspace.
pub fn run_period(args: &RunArgs) -> LuccResult<PipelineOutputs> {
    run_period_with_nodata(args, DEFAULT_NODATA)
}

/// [`run_period`] with an explicit nodata sentinel for the derived rasters.
pub fn run_period_with_nodata(
    args: &RunArgs,
    nodata: FloatValue,
) -> LuccResult<PipelineOutputs> {
    args.validate()?;
    let period = Period::new(args.start_year, args.end_year)?;

    let mut workspace = Workspace::create(&args.workspace_dir)?;
    let tables = load_pool_tables(&args.carbon_pools_path)?;
    let lulc_baseline = ClassRaster::load(&args.lulc_baseline_path)?;
    let lulc_alternate = ClassRaster::load(&args.lulc_alternate_path)?;

    info!(
        "running period {}->{} into {}",
        period.start_year(),
        period.end_year(),
        workspace.root().display()
    );

    let inputs = PipelineInputs {
        lulc_baseline: &lulc_baseline,
        lulc_alternate: &lulc_alternate,
        tables: &tables,
        period,
        nodata,
    };
    let outputs = run_pipeline(&inputs, &mut workspace)?;

    info!(
        "period {}->{} complete, net change written to {}",
        period.start_year(),
        period.end_year(),
        workspace.output_path(lucc_core::pipeline::CHANGE_NET).display()
    );
    Ok(outputs)
}

/// One period entry of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSpec {
    pub start_year: i32,
    pub end_year: i32,
    pub lulc_baseline_path: PathBuf,
    pub lulc_alternate_path: PathBuf,
    pub carbon_pools_path: PathBuf,
}

/// An ordered list of periods sharing one workspace root.
///
/// Each period runs in an isolated `<start>_<end>` directory under the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPlan {
    pub workspace_root: PathBuf,
    pub periods: Vec<PeriodSpec>,
}

impl RunPlan {
    /// Read a run plan from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> LuccResult<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| LuccError::Config(format!("invalid run plan: {e}")))
    }

    /// The per-period arguments, in plan order.
    pub fn period_args(&self) -> Vec<RunArgs> {
        self.periods
            .iter()
            .map(|spec| RunArgs {
                workspace_dir: self
                    .workspace_root
                    .join(format!("{}_{}", spec.start_year, spec.end_year)),
                lulc_baseline_path: spec.lulc_baseline_path.clone(),
                lulc_alternate_path: spec.lulc_alternate_path.clone(),
                carbon_pools_path: spec.carbon_pools_path.clone(),
                start_year: spec.start_year,
                end_year: spec.end_year,
            })
            .collect()
    }
}

/// Run every period of the plan in order, aborting on the first failure.
///
/// Periods share no mutable state; outputs of completed periods are left in
/// place when a later period fails.
pub fn run_batch(plan: &RunPlan) -> LuccResult<Vec<PipelineOutputs>> {
    let mut outputs = Vec::with_capacity(plan.periods.len());
    for args in plan.period_args() {
        outputs.push(run_period(&args)?);
    }
    info!("all {} periods complete", outputs.len());
    Ok(outputs)
}
