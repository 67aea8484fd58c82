//! Information criteria for model comparison
//!
//! Candidate ARIMA orders are ranked by corrected Akaike Information
//! Criterion, which penalizes parameter count more heavily on the short
//! annual series this workspace deals with.

use crate::{MathError, Result};

/// Gaussian log-likelihood of `n` residuals with variance `variance`,
/// up to the usual constant terms.
pub fn gaussian_log_likelihood(n: f64, variance: f64) -> f64 {
    -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + variance.ln() + 1.0)
}

/// Akaike Information Criterion. Lower is better.
pub fn aic(log_likelihood: f64, k: f64) -> f64 {
    -2.0 * log_likelihood + 2.0 * k
}

/// Corrected AIC for small samples. Undefined when `n <= k + 1`.
pub fn aicc(log_likelihood: f64, k: f64, n: f64) -> Result<f64> {
    if n <= k + 1.0 {
        return Err(MathError::InsufficientData(format!(
            "AICc undefined for {} observations and {} parameters",
            n, k
        )));
    }
    Ok(aic(log_likelihood, k) + 2.0 * k * (k + 1.0) / (n - k - 1.0))
}

/// Bayesian Information Criterion. Lower is better.
pub fn bic(log_likelihood: f64, k: f64, n: f64) -> f64 {
    -2.0 * log_likelihood + k * n.ln()
}
