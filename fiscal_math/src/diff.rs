//! Differencing and integration of time series
//!
//! ARIMA models operate on a differenced copy of the observed series;
//! forecasts produced on the differenced scale are integrated back onto
//! the original scale using the tail values of the source series.

use crate::{MathError, Result};

/// Difference a series `d` times.
///
/// Each pass replaces the series with its first differences, so the
/// output is `d` elements shorter than the input. Differencing an
/// input of length `<= d` yields an empty vector.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut out = series.to_vec();
    for _ in 0..d {
        out = out.windows(2).map(|w| w[1] - w[0]).collect();
    }
    out
}

/// Integrate a forecast made on the `d`-times differenced scale back
/// onto the scale of `original`.
///
/// The forecast is assumed to continue `original` immediately after its
/// last observation. Requires `original.len() >= d` so that a tail value
/// exists at every differencing level.
pub fn integrate(forecast: &[f64], original: &[f64], d: usize) -> Result<Vec<f64>> {
    if d == 0 {
        return Ok(forecast.to_vec());
    }
    if original.len() < d {
        return Err(MathError::InsufficientData(format!(
            "cannot integrate order {} from a series of {} observations",
            d,
            original.len()
        )));
    }

    // Last value of the original series at each differencing level 0..d-1.
    let mut tails = Vec::with_capacity(d);
    let mut current = original.to_vec();
    for _ in 0..d {
        let last = current
            .last()
            .copied()
            .ok_or_else(|| MathError::InsufficientData("empty series".to_string()))?;
        tails.push(last);
        current = difference(&current, 1);
    }

    let mut values = forecast.to_vec();
    for k in (0..d).rev() {
        let mut prev = tails[k];
        for v in values.iter_mut() {
            *v += prev;
            prev = *v;
        }
    }

    Ok(values)
}
