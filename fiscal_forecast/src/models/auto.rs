//! Order search over a bounded ARIMA grid
//!
//! The search enumerates every `(p, d, q)` combination inside the
//! configured bounds in a fixed order and keeps the fit with the lowest
//! corrected AIC. Orders that fail to fit are skipped; only a grid with
//! no surviving fit at all is an error. The enumeration order and the
//! estimator are deterministic, so identical inputs always select the
//! same model.

use crate::error::{FiscalError, Result};
use crate::models::arima::{ArimaModel, FittedArimaModel};
use crate::models::{FittedForecastModel, ForecastModel, ForecastResult, DEFAULT_CONFIDENCE_LEVEL};
use crate::panel::Panel;
use serde::{Deserialize, Serialize};

/// Bounds and coverage for the order search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoArimaConfig {
    /// Largest AR order considered
    pub max_p: usize,
    /// Largest differencing order considered
    pub max_d: usize,
    /// Largest MA order considered
    pub max_q: usize,
    /// Interval coverage of the returned forecasts
    pub level: f64,
}

impl Default for AutoArimaConfig {
    fn default() -> Self {
        Self {
            max_p: 3,
            max_d: 2,
            max_q: 3,
            level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

/// Fit every order in the grid and return the one with the lowest AICc.
///
/// `series_name` identifies the series in the error raised when no
/// order converges.
pub fn auto_fit(
    series_name: &str,
    series: &[f64],
    config: &AutoArimaConfig,
) -> Result<FittedArimaModel> {
    let mut best: Option<FittedArimaModel> = None;

    for d in 0..=config.max_d {
        for p in 0..=config.max_p {
            for q in 0..=config.max_q {
                let fitted = match ArimaModel::new(p, d, q).fit(series) {
                    Ok(fitted) => fitted,
                    // A single order failing to converge is recoverable.
                    Err(_) => continue,
                };

                if best
                    .as_ref()
                    .map_or(true, |current| fitted.aicc() < current.aicc())
                {
                    best = Some(fitted);
                }
            }
        }
    }

    best.ok_or_else(|| FiscalError::ModelFit {
        series: series_name.to_string(),
    })
}

/// Forecast a fully observed series `horizon` steps ahead using the
/// best order in the grid.
pub fn forecast_series(
    series_name: &str,
    series: &[f64],
    horizon: usize,
    config: &AutoArimaConfig,
) -> Result<ForecastResult> {
    if horizon == 0 {
        return Err(FiscalError::InvalidParameter(
            "forecast horizon must be positive".to_string(),
        ));
    }

    let fitted = auto_fit(series_name, series, config)?;
    fitted.forecast_with_level(horizon, config.level)
}

/// Forecast one panel column with the default search configuration.
///
/// Fails with `IncompleteSeries` when the column contains an absent
/// value; the forecaster never interpolates or skips.
pub fn forecast_column(panel: &Panel, column: &str, horizon: usize) -> Result<ForecastResult> {
    let series = panel.complete_column(column)?;
    forecast_series(column, &series, horizon, &AutoArimaConfig::default())
}
