//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON
//! - reloaded later for printing or plotting

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Direction in which observations are ordered by x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A single paired measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
}

/// Summary stats about the observations actually used for fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    /// Raw rows discarded because x or y was absent.
    pub n_dropped: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub order: SortOrder,
}

/// An x-value that occurs more than once, with its multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub x: f64,
    pub count: usize,
}

/// Per-observation weights derived from x multiplicity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    /// One weight per observation, in observation order.
    pub weights: Vec<f64>,
    /// Duplicated x-values in ascending x order (diagnostic only; the fitter ignores it).
    pub duplicates: Vec<DuplicateGroup>,
}

impl WeightVector {
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// True when no x-value is repeated (the fit degenerates to ordinary least squares).
    pub fn has_no_duplicates(&self) -> bool {
        self.duplicates.is_empty()
    }
}

/// Covariance matrix of `(slope, intercept)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterCovariance {
    pub var_slope: f64,
    pub var_intercept: f64,
    pub cov_slope_intercept: f64,
}

impl ParameterCovariance {
    pub fn slope_std_err(&self) -> f64 {
        self.var_slope.sqrt()
    }

    pub fn intercept_std_err(&self) -> f64 {
        self.var_intercept.sqrt()
    }
}

/// Output of the weighted linear fit `y = k·x + b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    /// `None` when there are no residual degrees of freedom (exactly 2 observations).
    pub covariance: Option<ParameterCovariance>,
    /// `y_i - (k·x_i + b)`, in observation order.
    pub residuals: Vec<f64>,
    pub r_squared: f64,
    /// `Σ w_i r_i²`.
    pub weighted_sse: f64,
    /// `n - 2`.
    pub dof: usize,
}

impl FitResult {
    /// Evaluate the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// A physical quantity computed from the fitted parameters, with first-order uncertainty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedQuantity {
    pub label: String,
    pub value: f64,
    pub standard_error: f64,
    /// `standard_error / |value| × 100` (percent); 0 when `value` is exactly 0.
    pub relative_uncertainty: f64,
    pub reference_value: Option<f64>,
    /// `(value - reference) / reference × 100` (percent).
    pub relative_deviation: Option<f64>,
}

/// Immutable bundle handed to printing/plotting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub stats: DatasetStats,
    pub observations: Vec<Observation>,
    pub weights: WeightVector,
    pub fit: FitResult,
    pub derived: Vec<DerivedQuantity>,
}

impl FitReport {
    pub fn predict(&self, x: f64) -> f64 {
        self.fit.predict(x)
    }

    /// Fitted line evaluated at every observed x.
    pub fn fitted_values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| self.fit.predict(o.x)).collect()
    }
}

/// Where a run reads its observations from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// One or more CSV files, each analyzed independently.
    Csv {
        paths: Vec<PathBuf>,
        x_col: String,
        y_col: String,
    },
    /// Values given directly on the command line.
    Inline { xs: Vec<f64>, ys: Vec<f64> },
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: InputSource,
    pub order: SortOrder,
    pub derived: Vec<crate::fit::DerivedSpec>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub svg: Option<PathBuf>,
    pub export: Option<PathBuf>,

    pub x_label: String,
    pub y_label: String,
}
