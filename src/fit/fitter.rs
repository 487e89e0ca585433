//! Weighted straight-line fit.
//!
//! Given:
//! - observations `(x_i, y_i)`
//! - weights `w_i`
//!
//! we solve the weighted normal equations for `y = k·x + b`, then compute:
//! - residuals `r_i = y_i - (k·x_i + b)`
//! - the residual variance estimate `σ̂² = Σ w_i r_i² / (n - 2)`
//! - the parameter covariance `σ̂²·(XᵀWX)⁻¹`
//! - r² (unweighted, see `goodness`)

use crate::data::ObservationSet;
use crate::domain::{FitResult, WeightVector};
use crate::error::{FitError, Result};
use crate::fit::goodness::r_squared_from_residuals;
use crate::math::{WeightedSums, parameter_covariance, solve_line};

/// Fit `y = k·x + b` minimizing `Σ w_i (y_i - k·x_i - b)²`.
pub fn fit(set: &ObservationSet, weights: &WeightVector) -> Result<FitResult> {
    let n = set.len();
    if weights.len() != n {
        return Err(FitError::Validation(format!(
            "weight vector has {} entries for {} observations",
            weights.len(),
            n
        )));
    }
    if weights.weights.iter().any(|w| !(w.is_finite() && *w > 0.0)) {
        return Err(FitError::Validation("weights must be finite and positive".to_string()));
    }

    let x: Vec<f64> = set.xs().collect();
    let y: Vec<f64> = set.ys().collect();
    let w = &weights.weights;

    let sums = WeightedSums::accumulate(&x, &y, w);
    let Some((slope, intercept)) = solve_line(&sums) else {
        return Err(FitError::SingularFit {
            n,
            distinct_x: count_distinct(&x),
        });
    };

    let residuals: Vec<f64> = x
        .iter()
        .zip(&y)
        .map(|(&xi, &yi)| yi - (slope * xi + intercept))
        .collect();
    let weighted_sse: f64 = residuals.iter().zip(w).map(|(r, wi)| wi * r * r).sum();

    // Two fitted parameters.
    let dof = n - 2;
    let covariance = if dof == 0 {
        None
    } else {
        let sigma2 = weighted_sse / dof as f64;
        parameter_covariance(&sums, sigma2)
    };

    let r_squared = r_squared_from_residuals(set.ys(), &residuals);

    tracing::debug!(
        n,
        slope,
        intercept,
        r_squared,
        weighted_sse,
        "weighted linear fit complete"
    );

    Ok(FitResult {
        slope,
        intercept,
        covariance,
        residuals,
        r_squared,
        weighted_sse,
        dof,
    })
}

fn count_distinct(x: &[f64]) -> usize {
    let mut sorted = x.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup_by(|a, b| a == b);
    sorted.len()
}
