//! Forecasting models for yearly economic series

use crate::error::{FiscalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod arima;
pub mod auto;

/// Default two-sided interval coverage
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Forecast result: point forecasts with a two-sided confidence
/// interval, indexed by horizon offset relative to the last observation.
///
/// Invariant: `lower[i] <= point[i] <= upper[i]` for every step.
/// Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    point: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    order: (usize, usize, usize),
    level: f64,
}

impl ForecastResult {
    /// Create a new forecast result, validating that the three
    /// sequences share one length.
    pub fn new(
        point: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        order: (usize, usize, usize),
        level: f64,
    ) -> Result<Self> {
        if point.len() != lower.len() || point.len() != upper.len() {
            return Err(FiscalError::InvalidParameter(format!(
                "forecast sequences have mismatched lengths ({}, {}, {})",
                point.len(),
                lower.len(),
                upper.len()
            )));
        }

        Ok(Self {
            point,
            lower,
            upper,
            order,
            level,
        })
    }

    /// Point forecasts
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// Lower interval bounds
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper interval bounds
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Number of forecast steps
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    /// Fitted `(p, d, q)` order
    pub fn order(&self) -> (usize, usize, usize) {
        self.order
    }

    /// Interval coverage level
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Serialize to JSON for the presentation boundary
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| FiscalError::Data(e.to_string()))
    }
}

/// Forecast model that can be fitted to a yearly series
pub trait ForecastModel: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedForecastModel;

    /// Fit the model to a fully observed series
    fn fit(&self, series: &[f64]) -> Result<Self::Fitted>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Fitted forecast model
pub trait FittedForecastModel: Debug {
    /// Forecast future periods with intervals at the given coverage
    fn forecast_with_level(&self, horizon: usize, level: f64) -> Result<ForecastResult>;

    /// Forecast future periods at the default coverage
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        self.forecast_with_level(horizon, DEFAULT_CONFIDENCE_LEVEL)
    }

    /// Name of the model
    fn name(&self) -> &str;
}
