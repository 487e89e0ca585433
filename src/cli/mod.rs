//! Command-line parsing for the lab data fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::SortOrder;
use crate::fit::DeriveKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "labfit", version, about = "Weighted linear fits for lab measurements, with uncertainty propagation")]
pub struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit one or more datasets, print the report, and optionally plot/export.
    Fit(FitArgs),
    /// Print a previously exported report JSON.
    Show(ShowArgs),
}

/// Ready-made derived quantities for known experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Speed of light from Δt' = k·Δs (Δs in cm, Δt' in ns); c = 10⁷/k m/s.
    SpeedOfLight,
    /// Resistance vs temperature: R₀ = b and α = k/b.
    Resistance,
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// CSV files to fit (each one is an independent dataset).
    #[arg(value_name = "CSV")]
    pub inputs: Vec<PathBuf>,

    /// CSV column holding x-values.
    #[arg(long, default_value = "x")]
    pub x_col: String,

    /// CSV column holding y-values.
    #[arg(long, default_value = "y")]
    pub y_col: String,

    /// Inline x-values (comma separated) instead of CSV input.
    #[arg(long = "x", value_name = "VALUES", value_delimiter = ',', allow_hyphen_values = true)]
    pub x_values: Vec<f64>,

    /// Inline y-values (comma separated) instead of CSV input.
    #[arg(long = "y", value_name = "VALUES", value_delimiter = ',', allow_hyphen_values = true)]
    pub y_values: Vec<f64>,

    /// Order observations by descending x.
    #[arg(long)]
    pub descending: bool,

    /// Derived quantity preset.
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Custom derived quantities (repeatable or comma separated).
    #[arg(long, value_enum, value_delimiter = ',')]
    pub derive: Vec<DeriveKind>,

    /// Multiplier applied to custom derived quantities.
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Reference value for custom derived quantities (reports relative deviation).
    #[arg(long)]
    pub reference: Option<f64>,

    /// Print the per-observation residual table.
    #[arg(long)]
    pub residuals: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Write an SVG chart (suffixed with the input name when fitting several files).
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Export the report to JSON (suffixed with the input name when fitting several files).
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// X axis label for charts.
    #[arg(long, default_value = "x")]
    pub x_label: String,

    /// Y axis label for charts.
    #[arg(long, default_value = "y")]
    pub y_label: String,
}

/// Options for printing a saved report.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Report JSON file produced by `labfit fit --export`.
    #[arg(value_name = "JSON")]
    pub report: PathBuf,

    /// Also print the terminal plot.
    #[arg(long)]
    pub plot: bool,
}

impl FitArgs {
    pub fn sort_order(&self) -> SortOrder {
        if self.descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}
