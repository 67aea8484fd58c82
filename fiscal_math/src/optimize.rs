//! Deterministic Nelder-Mead simplex minimization
//!
//! The forecasting crate estimates ARIMA coefficients by minimizing a
//! conditional sum of squares. Repeated fits over the same series must
//! return identical coefficients, so the initial simplex is built with a
//! fixed per-coordinate step and the algorithm uses no randomness.

use serde::{Deserialize, Serialize};

/// Configuration for the Nelder-Mead search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations
    pub max_iter: usize,
    /// Convergence tolerance on the simplex value spread
    pub tolerance: f64,
    /// Relative step used to build the initial simplex
    pub step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            step: 0.1,
        }
    }
}

/// Outcome of a Nelder-Mead search
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// Best point found
    pub optimal_point: Vec<f64>,
    /// Objective value at the best point
    pub optimal_value: f64,
    /// Iterations performed
    pub iterations: usize,
    /// Whether the simplex spread fell below the tolerance
    pub converged: bool,
}

// Standard simplex coefficients: reflection, expansion, contraction, shrink.
const ALPHA: f64 = 1.0;
const GAMMA: f64 = 2.0;
const RHO: f64 = 0.5;
const SIGMA: f64 = 0.5;

/// Minimize `f` starting from `initial`, optionally clamping every
/// candidate point to per-coordinate `bounds`.
pub fn nelder_mead<F>(
    f: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return NelderMeadResult {
            optimal_point: Vec::new(),
            optimal_value: f(initial),
            iterations: 0,
            converged: true,
        };
    }

    let clamp = |point: &mut Vec<f64>| {
        if let Some(bounds) = bounds {
            for (value, &(lo, hi)) in point.iter_mut().zip(bounds.iter()) {
                *value = value.clamp(lo, hi);
            }
        }
    };

    // Initial simplex: the start point plus one perturbed vertex per
    // coordinate, with a fixed deterministic step.
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    let mut start = initial.to_vec();
    clamp(&mut start);
    simplex.push(start.clone());
    for i in 0..n {
        let mut vertex = start.clone();
        if vertex[i] != 0.0 {
            vertex[i] *= 1.0 + config.step;
        } else {
            vertex[i] = config.step;
        }
        clamp(&mut vertex);
        simplex.push(vertex);
    }

    let mut values: Vec<f64> = simplex.iter().map(|p| f(p)).collect();

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;

        // Order vertices by objective value, best first.
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        let simplex_sorted: Vec<Vec<f64>> = order.iter().map(|&i| simplex[i].clone()).collect();
        let values_sorted: Vec<f64> = order.iter().map(|&i| values[i]).collect();
        simplex = simplex_sorted;
        values = values_sorted;

        if (values[n] - values[0]).abs() < config.tolerance {
            converged = true;
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; n];
        for vertex in simplex.iter().take(n) {
            for (c, v) in centroid.iter_mut().zip(vertex.iter()) {
                *c += v / n as f64;
            }
        }

        // Reflection.
        let mut reflected: Vec<f64> = centroid
            .iter()
            .zip(simplex[n].iter())
            .map(|(c, w)| c + ALPHA * (c - w))
            .collect();
        clamp(&mut reflected);
        let reflected_value = f(&reflected);

        if reflected_value < values[0] {
            // Expansion.
            let mut expanded: Vec<f64> = centroid
                .iter()
                .zip(reflected.iter())
                .map(|(c, r)| c + GAMMA * (r - c))
                .collect();
            clamp(&mut expanded);
            let expanded_value = f(&expanded);
            if expanded_value < reflected_value {
                simplex[n] = expanded;
                values[n] = expanded_value;
            } else {
                simplex[n] = reflected;
                values[n] = reflected_value;
            }
            continue;
        }

        if reflected_value < values[n - 1] {
            simplex[n] = reflected;
            values[n] = reflected_value;
            continue;
        }

        // Contraction.
        let mut contracted: Vec<f64> = centroid
            .iter()
            .zip(simplex[n].iter())
            .map(|(c, w)| c + RHO * (w - c))
            .collect();
        clamp(&mut contracted);
        let contracted_value = f(&contracted);
        if contracted_value < values[n] {
            simplex[n] = contracted;
            values[n] = contracted_value;
            continue;
        }

        // Shrink toward the best vertex.
        let best = simplex[0].clone();
        for i in 1..=n {
            let mut shrunk: Vec<f64> = best
                .iter()
                .zip(simplex[i].iter())
                .map(|(b, v)| b + SIGMA * (v - b))
                .collect();
            clamp(&mut shrunk);
            values[i] = f(&shrunk);
            simplex[i] = shrunk;
        }
    }

    let mut best_index = 0;
    for i in 1..=n {
        if values[i] < values[best_index] {
            best_index = i;
        }
    }

    NelderMeadResult {
        optimal_point: simplex[best_index].clone(),
        optimal_value: values[best_index],
        iterations,
        converged,
    }
}
