//! Ratio projection of two independent forecasts
//!
//! Combines a numerator and a denominator forecast into a ratio
//! forecast (debt over GDP in the original application) with bounds
//! propagated by worst-case interval arithmetic: the ratio's lower
//! bound divides the numerator's lower bound by the denominator's upper
//! bound, and vice versa.
//!
//! This is a conservative approximation, not a joint-distribution
//! interval: it assumes the two forecast errors are independent and
//! monotone within their own intervals, which may not hold when both
//! series share macroeconomic shocks. Callers needing tighter bounds
//! must supply a joint model.

use crate::error::{FiscalError, Result};
use crate::models::ForecastResult;

/// Debt-to-GDP level conventionally treated as unsustainable
pub const DEFAULT_SUSTAINABILITY_THRESHOLD: f64 = 1.0;

/// Combine two forecasts into a ratio forecast with propagated bounds.
///
/// Both inputs must share one horizon, and the denominator's point
/// forecast and both bounds must be strictly positive at every step;
/// a zero or sign-flipping denominator has no defined ratio semantics.
pub fn project_ratio(
    numerator: &ForecastResult,
    denominator: &ForecastResult,
) -> Result<ForecastResult> {
    if numerator.horizon() != denominator.horizon() {
        return Err(FiscalError::InvalidParameter(format!(
            "forecast horizons differ ({} vs {})",
            numerator.horizon(),
            denominator.horizon()
        )));
    }

    for step in 0..denominator.horizon() {
        for (label, value) in [
            ("point forecast", denominator.point()[step]),
            ("lower bound", denominator.lower()[step]),
            ("upper bound", denominator.upper()[step]),
        ] {
            if value <= 0.0 {
                return Err(FiscalError::InvalidRatioInput {
                    step,
                    reason: format!("denominator {} is {}, must be positive", label, value),
                });
            }
        }
    }

    let point: Vec<f64> = numerator
        .point()
        .iter()
        .zip(denominator.point())
        .map(|(n, d)| n / d)
        .collect();
    let lower: Vec<f64> = numerator
        .lower()
        .iter()
        .zip(denominator.upper())
        .map(|(n, d)| n / d)
        .collect();
    let upper: Vec<f64> = numerator
        .upper()
        .iter()
        .zip(denominator.lower())
        .map(|(n, d)| n / d)
        .collect();

    ForecastResult::new(point, lower, upper, numerator.order(), numerator.level())
}

/// Per-step check of a ratio's point forecast against a sustainability
/// threshold, for the presentation boundary.
pub fn breaches(ratio: &ForecastResult, threshold: f64) -> Vec<bool> {
    ratio.point().iter().map(|r| *r > threshold).collect()
}
