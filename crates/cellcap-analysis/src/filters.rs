//! Row selection on measurement tables.
//!
//! Filters never reorder rows and never fail on an empty selection; a filter
//! that matches nothing returns an empty table with the same schema.

use polars::prelude::{DataFrame, DataType, IntoLazy, SortMultipleOptions, col, lit};
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::rows::require_column;
use crate::time_key::TimeKey;

/// Select rows whose time index lies in `[start, stop]` inclusive.
///
/// The index column must have a datetime type. Day bounds cover their whole
/// day, so `2021-01-22..=2021-01-28` keeps every sample taken on the 28th.
pub fn isolate_time_interval(
    df: &DataFrame,
    index_column: &str,
    start: &TimeKey,
    stop: &TimeKey,
) -> Result<DataFrame> {
    let column = require_column(df, index_column)?;
    let unit = match column.dtype() {
        DataType::Datetime(unit, _) => *unit,
        other => {
            return Err(AnalysisError::InvalidIndex {
                column: index_column.to_string(),
                dtype: other.to_string(),
            });
        }
    };

    let lower = start.lower_physical(unit);
    let upper = stop.upper_physical(unit);
    let physical = col(index_column).cast(DataType::Int64);

    let window = df
        .clone()
        .lazy()
        .filter(physical.clone().gt_eq(lit(lower)).and(physical.lt_eq(lit(upper))))
        .collect()?;

    debug!(
        index = index_column,
        %start,
        %stop,
        rows = window.height(),
        "isolated time interval"
    );
    Ok(window)
}

/// Select rows whose step column equals `step`.
///
/// Integer and floating-point step columns are both accepted.
pub fn isolate_step_index(df: &DataFrame, step: i64, column_name: &str) -> Result<DataFrame> {
    require_column(df, column_name)?;

    let selected = df
        .clone()
        .lazy()
        .filter(col(column_name).cast(DataType::Float64).eq(lit(step as f64)))
        .collect()?;

    debug!(column = column_name, step, rows = selected.height(), "isolated step");
    Ok(selected)
}

/// Select the rows of one step inside a time window.
pub fn isolate_step_index_in_interval(
    df: &DataFrame,
    index_column: &str,
    start: &TimeKey,
    stop: &TimeKey,
    step: i64,
    column_name: &str,
) -> Result<DataFrame> {
    let window = isolate_time_interval(df, index_column, start, stop)?;
    isolate_step_index(&window, step, column_name)
}

/// Stack several logs of the same schema and order them by the time index.
pub fn merge_runs(runs: &[DataFrame], index_column: &str) -> Result<DataFrame> {
    let Some((first, rest)) = runs.split_first() else {
        return Err(AnalysisError::EmptyInput {
            operation: "merge_runs",
        });
    };
    require_column(first, index_column)?;

    let mut merged = first.clone();
    for run in rest {
        merged.vstack_mut(run)?;
    }

    let sorted = merged.sort(
        [index_column],
        SortMultipleOptions::default().with_maintain_order(true),
    )?;
    debug!(runs = runs.len(), rows = sorted.height(), "merged runs");
    Ok(sorted)
}
