//! End-to-end discharge analysis.
//!
//! Chains the table operations in the order a capacity test is evaluated:
//!
//! 1. keep only the test window (for [`analyze_discharge_in_window`])
//! 2. keep only the discharge step (when [`AnalysisOptions::step_index`] is set)
//! 3. trim every row after the first cell reaches the cutoff voltage
//! 4. rebase test time to the start of the remaining rows
//! 5. estimate SOC and capacity per cell
//!
//! # Example
//!
//! ```ignore
//! use cellcap_analysis::pipeline::analyze_discharge;
//! use cellcap_model::AnalysisOptions;
//!
//! let options = AnalysisOptions::default().with_step_index(13).with_cutoff_voltage(2.0);
//! let report = analyze_discharge(&log, &options)?;
//! ```

use cellcap_model::{AnalysisOptions, CapacityReport};
use polars::prelude::DataFrame;
use tracing::{debug, info_span};

use crate::error::Result;
use crate::estimate::{capacity_frame, final_soc};
use crate::filters::{isolate_step_index, isolate_time_interval};
use crate::test_time::rebase_test_time;
use crate::time_key::TimeKey;
use crate::voltage::trim_to_cutoff_voltage;

/// Estimate per-cell SOC and capacity for one discharge log.
pub fn analyze_discharge(df: &DataFrame, options: &AnalysisOptions) -> Result<CapacityReport> {
    let span = info_span!("analyze_discharge", rows = df.height());
    let _enter = span.enter();
    let schema = &options.schema;

    let discharge = match options.step_index {
        Some(step) => isolate_step_index(df, step, &schema.step_index)?,
        None => df.clone(),
    };
    let trimmed = trim_to_cutoff_voltage(&discharge, options.cutoff_voltage, schema)?;
    let rebased = rebase_test_time(&trimmed, schema)?;
    let report = final_soc(&rebased, schema)?;

    debug!(
        reference = %report.reference_cell,
        capacity_ah = report.reference_capacity_ah,
        "discharge analysed"
    );
    Ok(report)
}

/// [`analyze_discharge`] restricted to `[start, stop]` of the schema's
/// timestamp column.
pub fn analyze_discharge_in_window(
    df: &DataFrame,
    start: &TimeKey,
    stop: &TimeKey,
    options: &AnalysisOptions,
) -> Result<CapacityReport> {
    let window = isolate_time_interval(df, &options.schema.date_time, start, stop)?;
    analyze_discharge(&window, options)
}

/// [`analyze_discharge`] for each run, capacities side by side.
pub fn analyze_runs(runs: &[DataFrame], options: &AnalysisOptions) -> Result<DataFrame> {
    let reports = runs
        .iter()
        .map(|run| analyze_discharge(run, options))
        .collect::<Result<Vec<_>>>()?;
    capacity_frame(&reports)
}
