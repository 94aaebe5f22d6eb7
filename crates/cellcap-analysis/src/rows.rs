//! Column and row access for measurement tables.
//!
//! Positional access is always relative to the current row order of the
//! table: "first" is row `0` and "last" is row `height - 1`.

use polars::prelude::{Column, DataFrame, DataType};

use crate::error::{AnalysisError, Result};

/// Look up a column, failing with [`AnalysisError::ColumnNotFound`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| AnalysisError::ColumnNotFound {
        column: name.to_string(),
    })
}

/// Reject a missing or NaN measurement.
fn measurement(value: Option<f64>, name: &str, row: usize) -> Result<f64> {
    match value {
        None => Err(AnalysisError::NullValue {
            column: name.to_string(),
            row,
        }),
        Some(value) if value.is_nan() => Err(AnalysisError::NotANumber {
            column: name.to_string(),
            row,
        }),
        Some(value) => Ok(value),
    }
}

/// Numeric column values as `f64`, nulls preserved.
pub fn column_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = require_column(df, name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}

/// Numeric column values as `f64`; a null or NaN anywhere is an error.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    column_f64(df, name)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| measurement(value, name, row))
        .collect()
}

/// Numeric value of `name` at `row`.
pub fn row_value(df: &DataFrame, name: &str, row: usize) -> Result<f64> {
    let value = require_column(df, name)?.get(row)?.extract::<f64>();
    measurement(value, name, row)
}

/// Value of `name` in the first row.
pub fn first_row_value(df: &DataFrame, name: &str, operation: &'static str) -> Result<f64> {
    require_column(df, name)?;
    if df.height() == 0 {
        return Err(AnalysisError::EmptyInput { operation });
    }
    row_value(df, name, 0)
}

/// Value of `name` in the final row.
pub fn last_row_value(df: &DataFrame, name: &str, operation: &'static str) -> Result<f64> {
    require_column(df, name)?;
    let Some(last) = df.height().checked_sub(1) else {
        return Err(AnalysisError::EmptyInput { operation });
    };
    row_value(df, name, last)
}
