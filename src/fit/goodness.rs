//! Coefficient of determination.
//!
//! Both sums are unweighted, even for a weighted fit: `ss_tot` uses the plain
//! arithmetic mean of y and `ss_res` the plain sum of squared residuals.

use crate::data::ObservationSet;
use crate::domain::FitResult;

/// `r² = 1 - ss_res/ss_tot`, or 0 when every y is equal.
///
/// Result lies in `(-∞, 1]`.
pub fn r_squared(set: &ObservationSet, fit: &FitResult) -> f64 {
    r_squared_from_residuals(set.ys(), &fit.residuals)
}

pub(crate) fn r_squared_from_residuals(ys: impl Iterator<Item = f64> + Clone, residuals: &[f64]) -> f64 {
    let (sum, n) = ys.clone().fold((0.0, 0usize), |(s, n), y| (s + y, n + 1));
    if n == 0 {
        return 0.0;
    }
    let mean = sum / n as f64;
    let ss_tot: f64 = ys.map(|y| (y - mean) * (y - mean)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    let ss_res: f64 = residuals.iter().map(|r| r * r).sum();
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortOrder;

    fn fit_with(residuals: Vec<f64>) -> FitResult {
        FitResult {
            slope: 0.0,
            intercept: 0.0,
            covariance: None,
            residuals,
            r_squared: 0.0,
            weighted_sse: 0.0,
            dof: 1,
        }
    }

    #[test]
    fn perfect_fit_is_one() {
        let set = ObservationSet::from_values(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0], SortOrder::Ascending).unwrap();
        assert_eq!(r_squared(&set, &fit_with(vec![0.0; 3])), 1.0);
    }

    #[test]
    fn constant_y_is_zero() {
        let set = ObservationSet::from_values(&[0.0, 1.0, 2.0], &[4.0; 3], SortOrder::Ascending).unwrap();
        assert_eq!(r_squared(&set, &fit_with(vec![0.5, -0.5, 0.0])), 0.0);
    }

    #[test]
    fn uses_unweighted_sums() {
        let set = ObservationSet::from_values(&[1.0, 1.0, 2.0], &[1.0, 2.0, 2.0], SortOrder::Ascending).unwrap();
        // ss_tot = 2/3, ss_res = 0.5
        let r2 = r_squared(&set, &fit_with(vec![-0.5, 0.5, 0.0]));
        assert!((r2 - 0.25).abs() < 1e-12);
    }

    #[test]
    fn poor_fit_can_be_negative() {
        let set = ObservationSet::from_values(&[0.0, 1.0], &[0.0, 1.0], SortOrder::Ascending).unwrap();
        let r2 = r_squared(&set, &fit_with(vec![3.0, -3.0]));
        assert!(r2 < 0.0);
    }
}
