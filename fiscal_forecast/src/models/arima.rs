//! Non-seasonal ARIMA estimated by conditional sum of squares

use crate::error::{FiscalError, Result};
use crate::models::{FittedForecastModel, ForecastModel, ForecastResult};
use fiscal_math::criteria::{aicc, gaussian_log_likelihood};
use fiscal_math::diff::{difference, integrate};
use fiscal_math::optimize::{nelder_mead, NelderMeadConfig};
use statrs::distribution::{ContinuousCDF, Normal};

// Residual variance can collapse to zero when an order reproduces the
// series exactly (e.g. a differenced linear trend). The likelihood uses
// this floor so a perfect fit ranks best without producing infinities.
const VARIANCE_FLOOR: f64 = 1e-12;

/// ARIMA(p, d, q) model specification
#[derive(Debug, Clone)]
pub struct ArimaModel {
    name: String,
    p: usize,
    d: usize,
    q: usize,
}

/// Fitted ARIMA model
#[derive(Debug, Clone)]
pub struct FittedArimaModel {
    name: String,
    p: usize,
    d: usize,
    q: usize,
    intercept: f64,
    ar_coefficients: Vec<f64>,
    ma_coefficients: Vec<f64>,
    original: Vec<f64>,
    differenced: Vec<f64>,
    residuals: Vec<f64>,
    residual_variance: f64,
    aicc: f64,
}

impl ArimaModel {
    /// Create a new ARIMA model specification
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self {
            name: format!("ARIMA({},{},{})", p, d, q),
            p,
            d,
            q,
        }
    }

    /// Conditional sum of squares of the model at the given parameters
    fn css(diff_series: &[f64], p: usize, q: usize, ar: &[f64], ma: &[f64], intercept: f64) -> f64 {
        let n = diff_series.len();
        let start = p.max(q);

        if n <= start {
            return f64::MAX;
        }

        let mut residuals = vec![0.0; n];
        let mut css = 0.0;

        for t in start..n {
            let mut pred = intercept;
            for i in 0..p {
                pred += ar[i] * (diff_series[t - 1 - i] - intercept);
            }
            for i in 0..q {
                pred += ma[i] * residuals[t - 1 - i];
            }

            let error = diff_series[t] - pred;
            residuals[t] = error;
            css += error * error;
        }

        css
    }

    /// Estimate intercept, AR, and MA coefficients by CSS minimization.
    fn estimate(&self, diff_series: &[f64]) -> (f64, Vec<f64>, Vec<f64>) {
        let p = self.p;
        let q = self.q;
        let mean = diff_series.iter().sum::<f64>() / diff_series.len() as f64;

        if p == 0 && q == 0 {
            return (mean, Vec::new(), Vec::new());
        }

        let mut initial = vec![0.0; 1 + p + q];
        initial[0] = mean;
        for i in 0..p {
            initial[1 + i] = 0.1 / (i + 1) as f64;
        }
        for i in 0..q {
            initial[1 + p + i] = 0.1 / (i + 1) as f64;
        }

        // Intercept unbounded; AR and MA coefficients bounded inside the
        // stationarity/invertibility region.
        let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
        bounds.extend(std::iter::repeat((-0.99, 0.99)).take(p + q));

        let result = nelder_mead(
            |params| {
                let intercept = params[0];
                let ar = &params[1..1 + p];
                let ma = &params[1 + p..];
                Self::css(diff_series, p, q, ar, ma, intercept)
            },
            &initial,
            Some(&bounds),
            NelderMeadConfig::default(),
        );

        let intercept = result.optimal_point[0];
        let ar = result.optimal_point[1..1 + p].to_vec();
        let ma = result.optimal_point[1 + p..].to_vec();
        (intercept, ar, ma)
    }
}

impl ForecastModel for ArimaModel {
    type Fitted = FittedArimaModel;

    fn fit(&self, series: &[f64]) -> Result<FittedArimaModel> {
        let min_len = self.d + self.p.max(self.q) + 2;
        if series.len() < min_len {
            return Err(FiscalError::InsufficientData {
                needed: min_len,
                got: series.len(),
            });
        }

        let diff_series = difference(series, self.d);
        let (intercept, ar, ma) = self.estimate(&diff_series);

        // One residual pass at the chosen parameters.
        let n = diff_series.len();
        let start = self.p.max(self.q);
        let mut residuals = vec![0.0; n];
        for t in start..n {
            let mut pred = intercept;
            for i in 0..self.p {
                pred += ar[i] * (diff_series[t - 1 - i] - intercept);
            }
            for i in 0..self.q {
                pred += ma[i] * residuals[t - 1 - i];
            }
            residuals[t] = diff_series[t] - pred;
        }

        let n_eff = n - start;
        let residual_variance =
            residuals[start..].iter().map(|r| r * r).sum::<f64>() / n_eff as f64;
        if !residual_variance.is_finite() {
            return Err(FiscalError::Data(format!(
                "{} produced a non-finite residual variance",
                self.name
            )));
        }

        let k = (self.p + self.q + 1) as f64;
        let log_likelihood =
            gaussian_log_likelihood(n_eff as f64, residual_variance.max(VARIANCE_FLOOR));
        let aicc = aicc(log_likelihood, k, n_eff as f64)?;
        if !aicc.is_finite() {
            return Err(FiscalError::Data(format!(
                "{} produced a non-finite information criterion",
                self.name
            )));
        }

        Ok(FittedArimaModel {
            name: self.name.clone(),
            p: self.p,
            d: self.d,
            q: self.q,
            intercept,
            ar_coefficients: ar,
            ma_coefficients: ma,
            original: series.to_vec(),
            differenced: diff_series,
            residuals,
            residual_variance,
            aicc,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedArimaModel {
    /// Fitted `(p, d, q)` order
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    /// AR coefficients
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coefficients
    }

    /// MA coefficients
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma_coefficients
    }

    /// Intercept on the differenced scale
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Residual variance on the differenced scale
    pub fn residual_variance(&self) -> f64 {
        self.residual_variance
    }

    /// Corrected Akaike Information Criterion of the fit
    pub fn aicc(&self) -> f64 {
        self.aicc
    }
}

impl FittedForecastModel for FittedArimaModel {
    fn forecast_with_level(&self, horizon: usize, level: f64) -> Result<ForecastResult> {
        if horizon == 0 {
            return Err(FiscalError::InvalidParameter(
                "forecast horizon must be positive".to_string(),
            ));
        }
        if level <= 0.0 || level >= 1.0 {
            return Err(FiscalError::InvalidParameter(
                "confidence level must be strictly between 0 and 1".to_string(),
            ));
        }

        // Iterate the recursion on the differenced scale; future
        // residuals are zero.
        let mut extended = self.differenced.clone();
        let mut extended_residuals = self.residuals.clone();
        for _ in 0..horizon {
            let t = extended.len();
            let mut pred = self.intercept;
            for i in 0..self.p {
                if t > i {
                    pred += self.ar_coefficients[i] * (extended[t - 1 - i] - self.intercept);
                }
            }
            for i in 0..self.q {
                if t > i {
                    pred += self.ma_coefficients[i] * extended_residuals[t - 1 - i];
                }
            }
            extended.push(pred);
            extended_residuals.push(0.0);
        }

        let forecast_diff = extended[self.differenced.len()..].to_vec();
        let point = integrate(&forecast_diff, &self.original, self.d)?;

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| FiscalError::InvalidParameter(e.to_string()))?;
        let z = normal.inverse_cdf((1.0 + level) / 2.0);

        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (h, value) in point.iter().enumerate() {
            // Forecast variance accumulates with horizon.
            let se = (self.residual_variance * (h + 1) as f64).sqrt();
            lower.push(value - z * se);
            upper.push(value + z * se);
        }

        ForecastResult::new(point, lower, upper, self.order(), level)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
