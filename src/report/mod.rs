//! Reporting utilities: the end-to-end analysis and per-observation residual rows.

pub mod format;

pub use format::*;

use crate::data::ObservationSet;
use crate::domain::FitReport;
use crate::error::Result;
use crate::fit::{DerivedSpec, derive_weights, fit};

/// One observation with its fitted value (used for tables and plots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualRow {
    pub x: f64,
    pub y_obs: f64,
    pub y_fit: f64,
    pub residual: f64,
    pub weight: f64,
}

/// Run the whole engine: weights → fit → r² → derived quantities.
pub fn analyze(set: &ObservationSet, derived: &[DerivedSpec]) -> Result<FitReport> {
    let weights = derive_weights(set);
    let fit = fit(set, &weights)?;
    let derived = derived
        .iter()
        .map(|spec| spec.evaluate(&fit))
        .collect::<Result<Vec<_>>>()?;

    Ok(FitReport {
        stats: set.stats(),
        observations: set.points().to_vec(),
        weights,
        fit,
        derived,
    })
}

/// Pair every observation with its fitted value and weight.
pub fn residual_rows(report: &FitReport) -> Vec<ResidualRow> {
    report
        .observations
        .iter()
        .zip(&report.fit.residuals)
        .zip(&report.weights.weights)
        .map(|((o, &residual), &weight)| ResidualRow {
            x: o.x,
            y_obs: o.y,
            y_fit: report.fit.predict(o.x),
            residual,
            weight,
        })
        .collect()
}
