//! First-order (delta-method) uncertainty propagation.
//!
//! A derived quantity `q = f(k)` gets `σ_q = |f'(k)|·σ_k`. For quantities that also
//! depend on the intercept, `q = f(k, b)`, the full parameter covariance is used:
//! `σ_q² = gᵀ Σ g` with `g = (∂f/∂k, ∂f/∂b)`.
//!
//! A transform that is undefined at the fitted parameters (non-finite value or
//! derivative) is an error, never a default: a zero slope fed to `1/k` means the
//! measurement produced no physical constant at all.

use crate::domain::{DerivedQuantity, FitResult, ParameterCovariance};
use crate::error::{FitError, Result};

/// Propagate the slope's uncertainty through `transform`.
///
/// `derivative` must be `d(transform)/dk`.
pub fn propagate<F, D>(fit: &FitResult, transform: F, derivative: D, reference: Option<f64>) -> Result<DerivedQuantity>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let k = fit.slope;
    let value = transform(k);
    if !value.is_finite() {
        return Err(FitError::UndefinedTransform(format!(
            "transform is not finite at slope k = {k}"
        )));
    }
    let slope_deriv = derivative(k);
    if !slope_deriv.is_finite() {
        return Err(FitError::UndefinedTransform(format!(
            "derivative is not finite at slope k = {k}"
        )));
    }
    let cov = require_covariance(fit)?;

    let standard_error = slope_deriv.abs() * cov.var_slope.sqrt();
    finish(value, standard_error, reference)
}

/// Propagate the joint `(k, b)` uncertainty through `transform`.
///
/// `gradient` must return `(∂f/∂k, ∂f/∂b)`.
pub fn propagate_joint<F, G>(
    fit: &FitResult,
    transform: F,
    gradient: G,
    reference: Option<f64>,
) -> Result<DerivedQuantity>
where
    F: Fn(f64, f64) -> f64,
    G: Fn(f64, f64) -> (f64, f64),
{
    let (k, b) = (fit.slope, fit.intercept);
    let value = transform(k, b);
    if !value.is_finite() {
        return Err(FitError::UndefinedTransform(format!(
            "transform is not finite at k = {k}, b = {b}"
        )));
    }
    let (gk, gb) = gradient(k, b);
    if !(gk.is_finite() && gb.is_finite()) {
        return Err(FitError::UndefinedTransform(format!(
            "gradient is not finite at k = {k}, b = {b}"
        )));
    }
    let cov = require_covariance(fit)?;

    let variance = gk * gk * cov.var_slope + 2.0 * gk * gb * cov.cov_slope_intercept + gb * gb * cov.var_intercept;
    // Rounding can push an exactly-zero variance slightly negative.
    let standard_error = variance.max(0.0).sqrt();
    finish(value, standard_error, reference)
}

fn require_covariance(fit: &FitResult) -> Result<ParameterCovariance> {
    fit.covariance.ok_or_else(|| {
        FitError::UndefinedTransform(format!(
            "parameter variance is undefined with {} residual degrees of freedom",
            fit.dof
        ))
    })
}

fn finish(value: f64, standard_error: f64, reference: Option<f64>) -> Result<DerivedQuantity> {
    let relative_uncertainty = if value == 0.0 {
        0.0
    } else {
        standard_error / value.abs() * 100.0
    };

    let relative_deviation = match reference {
        Some(r) if r == 0.0 || !r.is_finite() => {
            return Err(FitError::Validation(format!(
                "reference value must be finite and non-zero, got {r}"
            )));
        }
        Some(r) => Some((value - r) / r * 100.0),
        None => None,
    };

    Ok(DerivedQuantity {
        label: String::new(),
        value,
        standard_error,
        relative_uncertainty,
        reference_value: reference,
        relative_deviation,
    })
}

impl DerivedQuantity {
    /// Attach a display label.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}
