//! Weighted least squares for a straight line.
//!
//! We solve problems of the form:
//!
//! ```text
//! minimize Σ w_i (y_i - k·x_i - b)^2
//! ```
//!
//! With only two parameters the normal equations are solved in closed form from the
//! centered moments (see `sums`). The covariance is built the same way: in the
//! centered parametrization `y = k·(x − x̄) + a` the normal matrix is diagonal,
//! `diag(Σw(x−x̄)², S_w)`, and `b = a − k·x̄` maps it back with the Jacobian
//! `J = [[1, 0], [−x̄, 1]]`:
//!
//! ```text
//! Cov(k, b) = σ̂²·J·diag(Σw(x−x̄)², S_w)⁻¹·Jᵀ = σ̂²·(XᵀWX)⁻¹
//! ```

use nalgebra::Matrix2;

use crate::domain::ParameterCovariance;
use crate::math::WeightedSums;

/// Closed-form `(slope, intercept)` from the weighted moments.
///
/// Returns `None` if the normal equations are singular.
pub fn solve_line(sums: &WeightedSums) -> Option<(f64, f64)> {
    if sums.is_singular() {
        return None;
    }
    let k = sums.s_wdxdy / sums.s_wdxx;
    let b = sums.y_mean - k * sums.x_mean;
    if k.is_finite() && b.is_finite() {
        Some((k, b))
    } else {
        None
    }
}

/// Normal matrix for the centered design rows `[x_i − x̄, 1]`.
pub fn centered_normal_matrix(sums: &WeightedSums) -> Matrix2<f64> {
    Matrix2::new(sums.s_wdxx, 0.0, 0.0, sums.s_w)
}

/// `σ̂²·(XᵀWX)⁻¹`, or `None` if the matrix cannot be inverted.
pub fn parameter_covariance(sums: &WeightedSums, sigma2: f64) -> Option<ParameterCovariance> {
    if sums.is_singular() {
        return None;
    }
    let inv = centered_normal_matrix(sums).try_inverse()?;
    let jacobian = Matrix2::new(1.0, 0.0, -sums.x_mean, 1.0);
    let cov = jacobian * inv * jacobian.transpose() * sigma2;
    Some(ParameterCovariance {
        var_slope: cov[(0, 0)],
        var_intercept: cov[(1, 1)],
        cov_slope_intercept: cov[(0, 1)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_simple_line() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let sums = WeightedSums::accumulate(&[0.0, 1.0, 2.0], &[2.0, 5.0, 8.0], &[1.0; 3]);
        let (k, b) = solve_line(&sums).unwrap();
        assert!((k - 3.0).abs() < 1e-12);
        assert!((b - 2.0).abs() < 1e-12);
    }

    #[test]
    fn covariance_is_scaled_inverse() {
        let sums = WeightedSums::accumulate(&[1.0, 1.0, 2.0], &[1.0, 2.0, 2.0], &[2.0, 2.0, 1.0]);
        // (XᵀWX) = [[8, 6], [6, 5]], inverse = [[5, -6], [-6, 8]] / 4.
        let cov = parameter_covariance(&sums, 2.0).unwrap();
        assert!((cov.var_slope - 2.5).abs() < 1e-12);
        assert!((cov.var_intercept - 4.0).abs() < 1e-12);
        assert!((cov.cov_slope_intercept + 3.0).abs() < 1e-12);
    }

    #[test]
    fn offset_x_solves_and_matches_shifted_covariance() {
        let x = [1e8, 1e8 + 1.0, 1e8 + 2.0, 1e8 + 3.0];
        let y = [1.0, 2.0, 3.0, 4.5];
        let sums = WeightedSums::accumulate(&x, &y, &[1.0; 4]);
        let (k, b) = solve_line(&sums).unwrap();

        let shifted = WeightedSums::accumulate(&[0.0, 1.0, 2.0, 3.0], &y, &[1.0; 4]);
        let (k0, b0) = solve_line(&shifted).unwrap();
        assert!((k - k0).abs() < 1e-9);
        assert!((b - (b0 - k0 * 1e8)).abs() < 1e-3);

        // Slope variance does not depend on where x starts.
        let cov = parameter_covariance(&sums, 1.0).unwrap();
        let cov0 = parameter_covariance(&shifted, 1.0).unwrap();
        assert!((cov.var_slope - cov0.var_slope).abs() < 1e-12);
        assert!((cov.cov_slope_intercept / cov.var_slope + 1e8 + 1.5).abs() < 1e-3);
    }

    #[test]
    fn singular_system_has_no_solution() {
        let sums = WeightedSums::accumulate(&[5.0, 5.0], &[1.0, 2.0], &[2.0, 2.0]);
        assert!(solve_line(&sums).is_none());
    }
}
