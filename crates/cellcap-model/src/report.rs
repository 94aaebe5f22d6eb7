use std::fmt;

use serde::{Deserialize, Serialize};

/// End-of-test estimate for a single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellEstimate {
    /// Human-readable cell identifier (e.g., "Cell 2").
    pub cell: String,
    /// Source voltage column (e.g., "Aux_Voltage_2(V)").
    pub column: String,
    /// Estimated state of charge in percent when the reference cell hit cutoff.
    pub soc: f64,
    /// Estimated capacity in ampere-hours.
    pub capacity_ah: f64,
}

/// Capacity and SOC estimates for every cell of one test run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    /// Voltage column of the first cell to reach cutoff.
    pub reference_cell: String,
    /// Discharged capacity of the reference cell in ampere-hours.
    pub reference_capacity_ah: f64,
    /// One entry per voltage column, in column order.
    pub cells: Vec<CellEstimate>,
}

impl CapacityReport {
    pub fn cell(&self, label: &str) -> Option<&CellEstimate> {
        self.cells.iter().find(|estimate| estimate.cell == label)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Estimate with the largest capacity, first one on ties.
    pub fn strongest_cell(&self) -> Option<&CellEstimate> {
        self.cells.iter().fold(None, |best, estimate| match best {
            Some(current) if current.capacity_ah >= estimate.capacity_ah => Some(current),
            _ => Some(estimate),
        })
    }
}

impl fmt::Display for CapacityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reference {}: {:.5} Ah",
            self.reference_cell, self.reference_capacity_ah
        )?;
        for estimate in &self.cells {
            write!(
                f,
                "\n{}: SOC {:.3} %, {:.5} Ah",
                estimate.cell, estimate.soc, estimate.capacity_ah
            )?;
        }
        Ok(())
    }
}
