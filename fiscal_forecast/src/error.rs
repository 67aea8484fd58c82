//! Error types for the fiscal_forecast crate

use crate::schema::SchemaViolation;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the fiscal_forecast crate
#[derive(Debug, Error)]
pub enum FiscalError {
    /// One or more required columns are absent from one or more
    /// integration inputs. Violations are accumulated across all
    /// inputs before this is raised.
    #[error("Schema validation failed: {}", format_violations(.0))]
    Schema(Vec<SchemaViolation>),

    /// A series passed to the forecaster contains an absent value
    #[error("Series '{series}' contains missing values")]
    IncompleteSeries { series: String },

    /// No model order in the search grid converged for a series
    #[error("No ARIMA order converged for series '{series}'")]
    ModelFit { series: String },

    /// A ratio denominator bound or point value is non-positive
    #[error("Invalid ratio input at step {step}: {reason}")]
    InvalidRatioInput { step: usize, reason: String },

    /// A series is too short for the requested model order
    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    Data(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    Polars(String),

    /// Error from numeric routines
    #[error("Math error: {0}")]
    Math(#[from] fiscal_math::MathError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, FiscalError>;

impl From<PolarsError> for FiscalError {
    fn from(err: PolarsError) -> Self {
        FiscalError::Polars(err.to_string())
    }
}

impl From<csv::Error> for FiscalError {
    fn from(err: csv::Error) -> Self {
        FiscalError::Data(err.to_string())
    }
}

fn format_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
