pub mod options;
pub mod report;
pub mod schema;

pub use options::{AnalysisOptions, DEFAULT_CUTOFF_VOLTAGE};
pub use report::{CapacityReport, CellEstimate};
pub use schema::TableSchema;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> CapacityReport {
        CapacityReport {
            reference_cell: "Aux_Voltage_1(V)".to_string(),
            reference_capacity_ah: 10.0,
            cells: vec![
                CellEstimate {
                    cell: "Cell 1".to_string(),
                    column: "Aux_Voltage_1(V)".to_string(),
                    soc: 0.0,
                    capacity_ah: 10.0,
                },
                CellEstimate {
                    cell: "Cell 2".to_string(),
                    column: "Aux_Voltage_2(V)".to_string(),
                    soc: 25.0,
                    capacity_ah: 12.5,
                },
            ],
        }
    }

    #[test]
    fn report_lookup_by_label() {
        let report = sample_report();
        assert_eq!(report.cell_count(), 2);
        assert_eq!(report.cell("Cell 2").map(|c| c.soc), Some(25.0));
        assert!(report.cell("Cell 3").is_none());
    }

    #[test]
    fn strongest_cell_has_largest_capacity() {
        let report = sample_report();
        assert_eq!(
            report.strongest_cell().map(|c| c.cell.as_str()),
            Some("Cell 2")
        );
        assert!(CapacityReport::default().strongest_cell().is_none());
    }
}
