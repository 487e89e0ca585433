//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - turns arguments into a `RunConfig`
//! - runs the fit pipeline
//! - prints reports/plots
//! - writes optional SVG charts and JSON exports

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{Command, FitArgs, Preset, ShowArgs};
use crate::domain::{InputSource, RunConfig};
use crate::error::AppError;
use crate::fit::DerivedSpec;
use crate::io::export::{ReportFile, read_report_json, write_report_json};
use crate::plot::{ChartLabels, render_ascii_plot, write_svg_chart};
use crate::report::{format_report, format_residual_table};

use self::pipeline::RunOutput;

pub mod pipeline;

const SVG_SIZE: (u32, u32) = (1000, 600);

/// Entry point for the `labfit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Fit(args) => handle_fit(&args),
        Command::Show(args) => handle_show(&args),
    }
}

fn handle_fit(args: &FitArgs) -> Result<(), AppError> {
    let config = run_config_from_args(args)?;
    let outputs = pipeline::analyze_batch(&config);

    let total = outputs.len();
    let several = total > 1;
    let mut failed = 0usize;
    let mut first_code = None;

    for (index, result) in outputs.into_iter().enumerate() {
        let run = match result {
            Ok(run) => run,
            Err(err) => {
                eprintln!("{err}");
                failed += 1;
                first_code.get_or_insert(err.exit_code());
                continue;
            }
        };

        for row_err in &run.row_errors {
            eprintln!("{}: line {}: {}", run.source, row_err.line, row_err.message);
        }

        println!("{}", format_report(&run.report, &run.source));
        if args.residuals {
            println!("{}", format_residual_table(&run.report));
        }
        if config.plot {
            println!("{}", render_ascii_plot(&run.report, config.plot_width, config.plot_height));
        }

        let suffix = several.then(|| batch_suffix(index, &run.source));
        if let Err(err) = write_outputs(&config, &run, suffix.as_deref()) {
            eprintln!("{err}");
            failed += 1;
            first_code.get_or_insert(err.exit_code());
        }
    }

    match first_code {
        Some(code) => Err(AppError::new(code, format!("{failed} of {total} dataset(s) failed"))),
        None => Ok(()),
    }
}

fn write_outputs(config: &RunConfig, run: &RunOutput, suffix: Option<&str>) -> Result<(), AppError> {
    if let Some(path) = &config.svg {
        let labels = ChartLabels {
            title: &run.source,
            x_label: &config.x_label,
            y_label: &config.y_label,
        };
        write_svg_chart(&output_path(path, suffix), &run.report, &labels, SVG_SIZE)
            .map_err(|e| e.with_context(&run.source))?;
    }
    if let Some(path) = &config.export {
        let file = ReportFile::new(run.source.clone(), run.report.clone());
        write_report_json(&output_path(path, suffix), &file).map_err(|e| e.with_context(&run.source))?;
    }
    Ok(())
}

fn handle_show(args: &ShowArgs) -> Result<(), AppError> {
    let file = read_report_json(&args.report)?;
    println!("{}", format_report(&file.report, &file.source));
    println!("(generated by {} at {})", file.tool, file.generated_at);
    if args.plot {
        println!("{}", render_ascii_plot(&file.report, 72, 20));
    }
    Ok(())
}

pub fn run_config_from_args(args: &FitArgs) -> Result<RunConfig, AppError> {
    let input = match (args.inputs.is_empty(), args.x_values.is_empty() && args.y_values.is_empty()) {
        (false, true) => InputSource::Csv {
            paths: args.inputs.clone(),
            x_col: args.x_col.clone(),
            y_col: args.y_col.clone(),
        },
        (true, false) => InputSource::Inline {
            xs: args.x_values.clone(),
            ys: args.y_values.clone(),
        },
        (false, false) => {
            return Err(AppError::new(2, "Give either CSV files or inline --x/--y values, not both."));
        }
        (true, true) => {
            return Err(AppError::new(2, "No input: give CSV files or inline --x/--y values."));
        }
    };

    let mut derived = match args.preset {
        Some(Preset::SpeedOfLight) => vec![DerivedSpec::speed_of_light()],
        Some(Preset::Resistance) => vec![DerivedSpec::resistance_at_zero(), DerivedSpec::temperature_coefficient()],
        None => Vec::new(),
    };
    for &kind in &args.derive {
        let mut spec = DerivedSpec::new(kind).with_scale(args.scale);
        if let Some(r) = args.reference {
            spec = spec.with_reference(r);
        }
        derived.push(spec);
    }

    Ok(RunConfig {
        input,
        order: args.sort_order(),
        derived,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        svg: args.svg.clone(),
        export: args.export.clone(),
        x_label: args.x_label.clone(),
        y_label: args.y_label.clone(),
    })
}

/// Per-dataset output suffix in a batch: input position plus file stem, so inputs
/// sharing a file name in different directories do not overwrite each other.
fn batch_suffix(index: usize, source: &str) -> String {
    let stem = Path::new(source)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string());
    format!("{}_{stem}", index + 1)
}

/// `out.svg` -> `out_<suffix>.svg` when a suffix is given.
fn output_path(base: &Path, suffix: Option<&str>) -> PathBuf {
    let Some(suffix) = suffix else {
        return base.to_path_buf();
    };
    let stem = base.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{stem}_{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{suffix}"),
    };
    base.with_file_name(name)
}
