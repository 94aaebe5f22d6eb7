//! Column naming for battery test measurement tables.
//!
//! A measurement table is a time-indexed log exported by the cell tester.
//! The tester names its columns after a fixed convention (`Test_Time(s)`,
//! `Current(A)`, `Aux_Voltage_1(V)`, ...). [`TableSchema`] captures that
//! convention so the analysis functions never hard-code column names.

use serde::{Deserialize, Serialize};

/// Default name of the timestamp index column.
pub const DATE_TIME_COLUMN: &str = "Date_Time";
/// Default name of the elapsed test time column, in seconds.
pub const TEST_TIME_COLUMN: &str = "Test_Time(s)";
/// Default name of the current column, in amperes.
pub const CURRENT_COLUMN: &str = "Current(A)";
/// Default name of the test step column.
pub const STEP_INDEX_COLUMN: &str = "Step_Index";
/// Substring marking a per-cell voltage column.
pub const VOLTAGE_MARKER: &str = "Aux_Voltage_";
/// Unit suffix carried by per-cell voltage columns.
pub const VOLTAGE_UNIT_SUFFIX: &str = "(V)";
/// Label used for cells in reports.
pub const CELL_LABEL: &str = "Cell";

/// Column names of a measurement table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSchema {
    /// Timestamp column rows are ordered and windowed by.
    pub date_time: String,
    /// Elapsed test time in seconds.
    pub test_time: String,
    /// Current in amperes; negative while discharging.
    pub current: String,
    /// Step number of the tester's schedule.
    pub step_index: String,
    /// Substring every per-cell voltage column contains.
    pub voltage_marker: String,
    /// Unit suffix stripped from voltage columns when labelling cells.
    pub voltage_suffix: String,
    /// Human-readable prefix for cell identifiers.
    pub cell_label: String,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            date_time: DATE_TIME_COLUMN.to_string(),
            test_time: TEST_TIME_COLUMN.to_string(),
            current: CURRENT_COLUMN.to_string(),
            step_index: STEP_INDEX_COLUMN.to_string(),
            voltage_marker: VOLTAGE_MARKER.to_string(),
            voltage_suffix: VOLTAGE_UNIT_SUFFIX.to_string(),
            cell_label: CELL_LABEL.to_string(),
        }
    }
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voltage_marker(mut self, marker: impl Into<String>) -> Self {
        self.voltage_marker = marker.into();
        self
    }

    pub fn with_cell_label(mut self, label: impl Into<String>) -> Self {
        self.cell_label = label.into();
        self
    }

    /// Returns true if `column` holds a per-cell voltage.
    pub fn is_voltage_column(&self, column: &str) -> bool {
        !self.voltage_marker.is_empty() && column.contains(&self.voltage_marker)
    }

    /// Human-readable identifier for a voltage column.
    ///
    /// The marker and unit suffix are removed and the remainder is prefixed
    /// with the cell label.
    ///
    /// ```
    /// use cellcap_model::TableSchema;
    ///
    /// let schema = TableSchema::default();
    /// assert_eq!(schema.cell_label_for("Aux_Voltage_2(V)"), "Cell 2");
    /// assert_eq!(schema.cell_label_for("Aux_Voltage_10"), "Cell 10");
    /// ```
    pub fn cell_label_for(&self, column: &str) -> String {
        let without_marker = match column.find(&self.voltage_marker) {
            Some(pos) if !self.voltage_marker.is_empty() => {
                &column[pos + self.voltage_marker.len()..]
            }
            _ => column,
        };
        let id = without_marker
            .strip_suffix(self.voltage_suffix.as_str())
            .unwrap_or(without_marker)
            .trim();
        if self.cell_label.is_empty() {
            id.to_string()
        } else {
            format!("{} {id}", self.cell_label)
        }
    }
}
