//! Read/write report JSON files.
//!
//! The JSON report is the portable representation of a fit:
//! - dataset stats, observations and derived weights
//! - slope, intercept, covariance, residuals, r²
//! - derived quantities
//!
//! wrapped with the tool name, the data source and a generation timestamp.

use std::fs::File;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::domain::FitReport;
use crate::error::AppError;

/// A saved report file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub generated_at: String,
    pub source: String,
    pub report: FitReport,
}

impl ReportFile {
    pub fn new(source: impl Into<String>, report: FitReport) -> Self {
        Self {
            tool: "labfit".to_string(),
            generated_at: Local::now().to_rfc3339(),
            source: source.into(),
            report,
        }
    }
}

/// Write a report JSON file.
pub fn write_report_json(path: &Path, file: &ReportFile) -> Result<(), AppError> {
    let out = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;
    tracing::info!(path = %path.display(), "wrote report JSON");
    Ok(())
}

/// Read a report JSON file.
pub fn read_report_json(path: &Path) -> Result<ReportFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open report JSON '{}': {e}", path.display())))?;
    let report: ReportFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid report JSON: {e}")))?;
    Ok(report)
}
