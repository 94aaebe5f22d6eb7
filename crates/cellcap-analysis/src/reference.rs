//! Voltage to state-of-charge reference built from the weakest cell.
//!
//! The cell whose voltage is lowest at the end of a discharge is the first
//! to reach cutoff. Its discharge curve is mapped onto a linear SOC ramp
//! from 100 % at the first row to 0 % at the last row, which gives a lookup
//! table for the charge the other cells still hold.
//!
//! The ramp assumes voltage tracks SOC monotonically over the run. It is an
//! approximation tied to the reference cell's own curve, not a calibrated
//! open-circuit-voltage model.

use cellcap_model::TableSchema;
use polars::prelude::{Column, DataFrame, DataType};
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::numeric::{linear_ramp, round_decimals};
use crate::rows::{last_row_value, require_column};
use crate::test_time::calculate_test_time;
use crate::voltage::require_voltage_columns;

/// Name of the SOC column in a [`SocReference`].
pub const SOC_COLUMN: &str = "SOC";

/// Decimal places kept in the SOC ramp.
pub const SOC_DECIMALS: i32 = 3;

/// Lookup table from reference-cell voltage to SOC.
///
/// `data` holds three columns in this order: rebased test time, the
/// reference cell's voltage (named after its source column), and [`SOC_COLUMN`].
#[derive(Debug, Clone)]
pub struct SocReference {
    /// Voltage column of the reference cell.
    pub cell: String,
    /// The lookup table.
    pub data: DataFrame,
}

impl SocReference {
    /// Number of rows in the lookup table.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// SOC for a measured voltage; see [`soc_from_lookup`].
    pub fn lookup(&self, voltage: f64) -> Result<f64> {
        soc_from_lookup(self, voltage)
    }
}

/// Voltage column with the smallest value in the final row.
///
/// Ties go to the column that comes first in the table.
pub fn smallest_voltage_cell(df: &DataFrame, schema: &TableSchema) -> Result<String> {
    let mut smallest: Option<(String, f64)> = None;
    for column in require_voltage_columns(df, schema)? {
        let voltage = last_row_value(df, &column, "smallest_voltage_cell")?;
        if smallest.as_ref().is_none_or(|(_, min)| voltage < *min) {
            smallest = Some((column, voltage));
        }
    }

    let Some((column, voltage)) = smallest else {
        return Err(AnalysisError::NoVoltageColumns {
            marker: schema.voltage_marker.clone(),
        });
    };
    debug!(cell = %column, voltage, "reference cell");
    Ok(column)
}

/// Build the SOC lookup table for a discharge.
///
/// Row `i` of `n` gets `100 - 100 * i / (n - 1)` percent, rounded to three
/// places. A single-row table maps to 100 %.
pub fn soc_reference(df: &DataFrame, schema: &TableSchema) -> Result<SocReference> {
    let cell = smallest_voltage_cell(df, schema)?;
    let test_time = calculate_test_time(df, schema)?;
    let voltage = require_column(df, &cell)?.cast(&DataType::Float64)?;
    let soc: Vec<f64> = linear_ramp(100.0, 0.0, df.height())
        .into_iter()
        .map(|value| round_decimals(value, SOC_DECIMALS))
        .collect();

    let data = DataFrame::new(vec![
        test_time.into(),
        voltage,
        Column::new(SOC_COLUMN.into(), soc),
    ])?;
    Ok(SocReference { cell, data })
}

/// SOC of the reference row whose voltage is closest to `voltage`.
///
/// This is a nearest-neighbour lookup without interpolation. On equal
/// distance the earlier row wins; rows with a missing or NaN voltage are
/// skipped.
pub fn soc_from_lookup(reference: &SocReference, voltage: f64) -> Result<f64> {
    if !voltage.is_finite() {
        return Err(AnalysisError::NonFiniteVoltage { value: voltage });
    }
    let voltages = reference.data.column(&reference.cell)?.f64()?;

    let mut nearest: Option<(usize, f64)> = None;
    for (row, candidate) in voltages.into_iter().enumerate() {
        let Some(candidate) = candidate.filter(|v| !v.is_nan()) else {
            continue;
        };
        let distance = (candidate - voltage).abs();
        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((row, distance));
        }
    }

    let Some((row, _)) = nearest else {
        return Err(AnalysisError::EmptyInput {
            operation: "soc_from_lookup",
        });
    };
    reference
        .data
        .column(SOC_COLUMN)?
        .f64()?
        .get(row)
        .ok_or_else(|| AnalysisError::NullValue {
            column: SOC_COLUMN.to_string(),
            row,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discharge() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Test_Time(s)".into(), vec![100.0, 110.0, 120.0, 130.0, 140.0]),
            Column::new("Aux_Voltage_1(V)".into(), vec![2.1, 2.0, 1.95, 1.9, 1.85]),
            Column::new("Aux_Voltage_2(V)".into(), vec![2.1, 2.0, 1.9, 1.85, 1.8]),
        ])
        .unwrap()
    }

    #[test]
    fn reference_columns_in_order() {
        let reference = soc_reference(&discharge(), &TableSchema::default()).unwrap();
        let names: Vec<String> = reference
            .data
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["Test_Time(s)", "Aux_Voltage_2(V)", "SOC"]);
        assert_eq!(reference.len(), 5);
    }

    #[test]
    fn reference_time_starts_at_zero() {
        let reference = soc_reference(&discharge(), &TableSchema::default()).unwrap();
        let time = reference.data.column("Test_Time(s)").unwrap().f64().unwrap();
        assert_eq!(time.get(0), Some(0.0));
        assert_eq!(time.get(4), Some(40.0));
    }

    #[test]
    fn ties_go_to_first_column() {
        let df = DataFrame::new(vec![
            Column::new("Test_Time(s)".into(), vec![0.0, 1.0]),
            Column::new("Aux_Voltage_1(V)".into(), vec![2.0, 1.8]),
            Column::new("Aux_Voltage_2(V)".into(), vec![2.1, 1.8]),
        ])
        .unwrap();
        assert_eq!(
            smallest_voltage_cell(&df, &TableSchema::default()).unwrap(),
            "Aux_Voltage_1(V)"
        );
    }

    #[test]
    fn single_row_maps_to_full_charge() {
        let df = discharge().head(Some(1));
        let reference = soc_reference(&df, &TableSchema::default()).unwrap();
        assert_eq!(reference.lookup(1.0).unwrap(), 100.0);
    }

    #[test]
    fn lookup_skips_missing_voltages() {
        let reference = SocReference {
            cell: "V".to_string(),
            data: DataFrame::new(vec![
                Column::new("V".into(), vec![None, Some(1.9), Some(1.8)]),
                Column::new(SOC_COLUMN.into(), vec![100.0, 50.0, 0.0]),
            ])
            .unwrap(),
        };
        assert_eq!(reference.lookup(2.5).unwrap(), 50.0);
    }

    #[test]
    fn lookup_skips_nan_voltages() {
        let reference = SocReference {
            cell: "V".to_string(),
            data: DataFrame::new(vec![
                Column::new("V".into(), vec![2.0, f64::NAN, 1.8]),
                Column::new(SOC_COLUMN.into(), vec![100.0, 50.0, 0.0]),
            ])
            .unwrap(),
        };
        assert_eq!(reference.lookup(1.85).unwrap(), 0.0);
    }

    #[test]
    fn lookup_rejects_non_finite_voltage() {
        let reference = soc_reference(&discharge(), &TableSchema::default()).unwrap();
        for voltage in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                reference.lookup(voltage),
                Err(AnalysisError::NonFiniteVoltage { .. })
            ));
        }
    }

    #[test]
    fn nan_final_voltage_is_rejected() {
        let df = DataFrame::new(vec![
            Column::new("Test_Time(s)".into(), vec![0.0, 10.0, 20.0]),
            Column::new("Aux_Voltage_1(V)".into(), vec![2.0, 1.9, f64::NAN]),
            Column::new("Aux_Voltage_2(V)".into(), vec![2.0, 1.95, 1.85]),
        ])
        .unwrap();
        assert!(matches!(
            smallest_voltage_cell(&df, &TableSchema::default()),
            Err(AnalysisError::NotANumber { column, row: 2 }) if column == "Aux_Voltage_1(V)"
        ));
    }
}
