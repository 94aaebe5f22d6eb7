//! Configuration options for discharge analysis.

use serde::{Deserialize, Serialize};

use crate::schema::TableSchema;

/// Default cutoff voltage per cell, in volts.
pub const DEFAULT_CUTOFF_VOLTAGE: f64 = 1.8;

/// Options controlling an end-to-end discharge analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Column naming of the measurement tables.
    pub schema: TableSchema,

    /// Voltage below which a cell counts as empty.
    ///
    /// Rows where any cell is below this value are dropped before the
    /// reference cell is chosen.
    pub cutoff_voltage: f64,

    /// Restrict the analysis to one step of the test schedule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_index: Option<i64>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            schema: TableSchema::default(),
            cutoff_voltage: DEFAULT_CUTOFF_VOLTAGE,
            step_index: None,
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cutoff_voltage(mut self, cutoff: f64) -> Self {
        self.cutoff_voltage = cutoff;
        self
    }

    pub fn with_step_index(mut self, step: i64) -> Self {
        self.step_index = Some(step);
        self
    }

    pub fn with_schema(mut self, schema: TableSchema) -> Self {
        self.schema = schema;
        self
    }
}
