//! Per-cell voltage columns: discovery and cutoff trimming.

use cellcap_model::TableSchema;
use polars::prelude::{DataFrame, DataType, IntoLazy, PlSmallStr, col, lit};
use tracing::{debug, warn};

use crate::error::{AnalysisError, Result};

/// Names of all per-cell voltage columns, in table order.
///
/// Position in this list follows the physical cell numbering, so the order
/// of the table is preserved.
pub fn voltage_column_list(df: &DataFrame, schema: &TableSchema) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(PlSmallStr::as_str)
        .filter(|name| schema.is_voltage_column(name))
        .map(str::to_string)
        .collect()
}

/// Number of per-cell voltage columns; zero is valid.
pub fn number_voltage_columns(df: &DataFrame, schema: &TableSchema) -> usize {
    voltage_column_list(df, schema).len()
}

/// Voltage columns, failing when there are none.
pub(crate) fn require_voltage_columns(df: &DataFrame, schema: &TableSchema) -> Result<Vec<String>> {
    let columns = voltage_column_list(df, schema);
    if columns.is_empty() {
        return Err(AnalysisError::NoVoltageColumns {
            marker: schema.voltage_marker.clone(),
        });
    }
    Ok(columns)
}

/// Drop rows where any cell voltage is below `cutoff`.
///
/// Each voltage column is filtered in turn, so a surviving row has every
/// cell at or above the cutoff. Rows with a missing or NaN voltage are
/// dropped.
///
/// For a discharge, where voltages only fall, the result is the prefix of
/// the table up to the first cell reaching cutoff. Tables without voltage
/// columns are returned unchanged.
pub fn trim_to_cutoff_voltage(
    df: &DataFrame,
    cutoff: f64,
    schema: &TableSchema,
) -> Result<DataFrame> {
    if df.height() == 0 {
        return Err(AnalysisError::EmptyInput {
            operation: "trim_to_cutoff_voltage",
        });
    }

    let columns = voltage_column_list(df, schema);
    if columns.is_empty() {
        return Ok(df.clone());
    }

    let mut trimmed = df.clone().lazy();
    for column in &columns {
        let voltage = col(column.as_str()).cast(DataType::Float64);
        trimmed = trimmed.filter(voltage.clone().is_not_nan().and(voltage.gt_eq(lit(cutoff))));
    }
    let trimmed = trimmed.collect()?;

    if trimmed.height() == 0 {
        warn!(cutoff, rows = df.height(), "every row is below the cutoff voltage");
    } else {
        debug!(
            cutoff,
            kept = trimmed.height(),
            dropped = df.height() - trimmed.height(),
            "trimmed to cutoff voltage"
        );
    }
    Ok(trimmed)
}
