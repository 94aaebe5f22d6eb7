//! End-of-test SOC and capacity estimates per cell.

use cellcap_model::{CapacityReport, CellEstimate, TableSchema};
use polars::prelude::{Column, DataFrame};
use tracing::{debug, trace};

use crate::error::{AnalysisError, Result};
use crate::numeric::trapezoid;
use crate::reference::{soc_from_lookup, soc_reference};
use crate::rows::{column_values, last_row_value};
use crate::voltage::{require_voltage_columns, voltage_column_list};

/// Name of the cell identifier column in capacity tables.
pub const CELL_COLUMN: &str = "Cell";

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Discharged capacity of the reference cell, in ampere-hours.
///
/// Current is integrated over test time with the trapezoidal rule. Discharge
/// current is negative in tester logs, so the integral is negated; a log with
/// positive discharge current yields a negative capacity. A table without
/// voltage columns has no reference cell and is rejected.
pub fn smallest_cap_cell(df: &DataFrame, schema: &TableSchema) -> Result<f64> {
    require_voltage_columns(df, schema)?;
    if df.height() == 0 {
        return Err(AnalysisError::EmptyInput {
            operation: "smallest_cap_cell",
        });
    }
    let time = column_values(df, &schema.test_time)?;
    let current = column_values(df, &schema.current)?;

    Ok(-trapezoid(&current, &time) / SECONDS_PER_HOUR)
}

/// SOC and capacity of every cell when the reference cell reached cutoff.
///
/// Each cell's final voltage is looked up in the reference table built by
/// [`soc_reference`]. The SOC it still held is added on top of the reference
/// capacity: `capacity = reference + reference * soc / 100`.
pub fn final_soc(df: &DataFrame, schema: &TableSchema) -> Result<CapacityReport> {
    let reference = soc_reference(df, schema)?;
    let reference_capacity = smallest_cap_cell(df, schema)?;

    let mut cells = Vec::new();
    for column in voltage_column_list(df, schema) {
        let voltage = last_row_value(df, &column, "final_soc")?;
        let soc = soc_from_lookup(&reference, voltage)?;
        let capacity_ah = reference_capacity + reference_capacity * soc / 100.0;
        trace!(cell = %column, voltage, soc, capacity_ah, "cell estimate");
        cells.push(CellEstimate {
            cell: schema.cell_label_for(&column),
            column,
            soc,
            capacity_ah,
        });
    }

    debug!(
        reference = %reference.cell,
        capacity_ah = reference_capacity,
        cells = cells.len(),
        "estimated final SOC"
    );
    Ok(CapacityReport {
        reference_cell: reference.cell,
        reference_capacity_ah: reference_capacity,
        cells,
    })
}

/// Capacities of several runs side by side.
///
/// One row per cell label, in order of first appearance, and one `Run N`
/// column per report. Cells missing from a run are null.
pub fn capacity_frame(reports: &[CapacityReport]) -> Result<DataFrame> {
    let mut labels: Vec<String> = Vec::new();
    for estimate in reports.iter().flat_map(|report| &report.cells) {
        if !labels.contains(&estimate.cell) {
            labels.push(estimate.cell.clone());
        }
    }

    let mut columns = Vec::with_capacity(reports.len() + 1);
    for (idx, report) in reports.iter().enumerate() {
        let capacities: Vec<Option<f64>> = labels
            .iter()
            .map(|label| report.cell(label).map(|estimate| estimate.capacity_ah))
            .collect();
        columns.push(Column::new(format!("Run {}", idx + 1).into(), capacities));
    }
    columns.insert(0, Column::new(CELL_COLUMN.into(), labels));

    Ok(DataFrame::new(columns)?)
}

/// [`final_soc`] for each run, aggregated with [`capacity_frame`].
pub fn capacity_table(runs: &[DataFrame], schema: &TableSchema) -> Result<DataFrame> {
    let reports = runs
        .iter()
        .map(|run| final_soc(run, schema))
        .collect::<Result<Vec<_>>>()?;
    capacity_frame(&reports)
}
