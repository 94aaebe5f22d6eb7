//! Capacity and state-of-charge analysis of battery cell test logs.
//!
//! All operations take a measurement table as a Polars [`DataFrame`] and
//! return new tables or values; nothing is mutated in place.
//!
//! - **filters**: time-window and test-step selection, merging of logs
//! - **test_time**: elapsed test time rebased to zero
//! - **voltage**: per-cell voltage column discovery and cutoff trimming
//! - **reference**: voltage to SOC lookup table from the first cell at cutoff
//! - **estimate**: reference capacity and per-cell SOC/capacity estimates
//! - **pipeline**: the above chained for a complete discharge test
//!
//! [`DataFrame`]: polars::prelude::DataFrame

pub mod error;
pub mod estimate;
pub mod filters;
pub mod numeric;
pub mod pipeline;
pub mod reference;
pub mod rows;
pub mod test_time;
pub mod time_key;
pub mod voltage;

pub use error::{AnalysisError, Result};
pub use estimate::{capacity_frame, capacity_table, final_soc, smallest_cap_cell};
pub use filters::{
    isolate_step_index, isolate_step_index_in_interval, isolate_time_interval, merge_runs,
};
pub use pipeline::{analyze_discharge, analyze_discharge_in_window, analyze_runs};
pub use reference::{SocReference, smallest_voltage_cell, soc_from_lookup, soc_reference};
pub use test_time::{calculate_test_time, rebase_test_time};
pub use time_key::TimeKey;
pub use voltage::{number_voltage_columns, trim_to_cutoff_voltage, voltage_column_list};
