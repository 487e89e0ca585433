//! Shared "fit pipeline" logic.
//!
//! Keeping this in one place avoids mixing the workflow with presentation:
//! load columns -> observation set -> engine -> report
//!
//! Datasets are independent, so several inputs are analyzed in parallel.

use std::path::Path;

use rayon::prelude::*;

use crate::data::ObservationSet;
use crate::domain::{FitReport, InputSource, RunConfig};
use crate::error::AppError;
use crate::io::ingest::{RowError, load_columns};
use crate::report::analyze;

/// All computed outputs for one dataset.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// File path or `"inline"`.
    pub source: String,
    pub report: FitReport,
    pub row_errors: Vec<RowError>,
}

/// Analyze every dataset named by the config, in input order.
pub fn analyze_batch(config: &RunConfig) -> Vec<Result<RunOutput, AppError>> {
    match &config.input {
        InputSource::Inline { xs, ys } => vec![analyze_inline(xs, ys, config)],
        InputSource::Csv { paths, x_col, y_col } => paths
            .par_iter()
            .map(|path| analyze_csv(path, x_col, y_col, config))
            .collect(),
    }
}

/// Analyze values given directly (no file involved).
pub fn analyze_inline(xs: &[f64], ys: &[f64], config: &RunConfig) -> Result<RunOutput, AppError> {
    let set = ObservationSet::from_values(xs, ys, config.order)?;
    let report = analyze(&set, &config.derived)?;
    Ok(RunOutput {
        source: "inline".to_string(),
        report,
        row_errors: Vec::new(),
    })
}

/// Analyze one CSV file.
pub fn analyze_csv(path: &Path, x_col: &str, y_col: &str, config: &RunConfig) -> Result<RunOutput, AppError> {
    let source = path.display().to_string();
    let columns = load_columns(path, x_col, y_col)?;
    let set = ObservationSet::build(&columns.xs, &columns.ys, config.order)
        .map_err(|e| AppError::from(e).with_context(&source))?;
    let report = analyze(&set, &config.derived).map_err(|e| AppError::from(e).with_context(&source))?;

    tracing::debug!(%source, rows_read = columns.rows_read, n = report.stats.n_points, "dataset analyzed");

    Ok(RunOutput {
        source,
        report,
        row_errors: columns.row_errors,
    })
}
