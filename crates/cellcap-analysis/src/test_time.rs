//! Elapsed test time relative to the start of a (possibly filtered) table.

use cellcap_model::TableSchema;
use polars::prelude::{DataFrame, NamedFrom, Series};

use crate::error::Result;
use crate::rows::{column_f64, first_row_value};

/// Test time in seconds, shifted so the first row is zero.
///
/// The returned series carries the test-time column name so it can replace
/// the original column directly.
pub fn calculate_test_time(df: &DataFrame, schema: &TableSchema) -> Result<Series> {
    let origin = first_row_value(df, &schema.test_time, "calculate_test_time")?;
    let rebased: Vec<Option<f64>> = column_f64(df, &schema.test_time)?
        .into_iter()
        .map(|value| value.map(|t| t - origin))
        .collect();
    Ok(Series::new(schema.test_time.as_str().into(), rebased))
}

/// Copy of `df` with its test-time column rebased to start at zero.
pub fn rebase_test_time(df: &DataFrame, schema: &TableSchema) -> Result<DataFrame> {
    let rebased = calculate_test_time(df, schema)?;
    let mut out = df.clone();
    out.with_column(rebased)?;
    Ok(out)
}
