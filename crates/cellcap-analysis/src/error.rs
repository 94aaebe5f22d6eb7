//! Error types for measurement table analysis.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while analysing a measurement table.
#[derive(Debug, Error)]
pub enum AnalysisError {
    // === Schema Errors ===
    /// Required column not found in the measurement table.
    #[error("column '{column}' not found in measurement table")]
    ColumnNotFound { column: String },

    /// Time index column has a non-datetime type.
    #[error("column '{column}' is not a datetime index (found {dtype})")]
    InvalidIndex { column: String, dtype: String },

    /// No column matches the voltage naming convention.
    #[error("no voltage columns containing '{marker}' in measurement table")]
    NoVoltageColumns { marker: String },

    // === Data Errors ===
    /// Operation needs at least one row.
    #[error("{operation} requires at least one row")]
    EmptyInput { operation: &'static str },

    /// Missing value where a measurement is required.
    #[error("null value in column '{column}' at row {row}")]
    NullValue { column: String, row: usize },

    /// NaN where a measurement is required.
    #[error("NaN value in column '{column}' at row {row}")]
    NotANumber { column: String, row: usize },

    /// Voltage query that is NaN or infinite.
    #[error("voltage {value} is not a finite number")]
    NonFiniteVoltage { value: f64 },

    /// Time bound that is neither a date nor a datetime.
    #[error("invalid time key '{value}'")]
    InvalidTimeKey { value: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
