//! # Fiscal Math
//!
//! Numeric routines for fiscal time series modelling.
//! This crate provides the low-level building blocks used by the
//! forecasting crate: series differencing and integration, a
//! deterministic Nelder-Mead minimizer, and information criteria
//! for model comparison.

use thiserror::Error;

pub mod criteria;
pub mod diff;
pub mod optimize;

/// Errors that can occur in numeric calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;
