//! Plotters-powered SVG chart of a fit.
//!
//! Chart elements:
//! - observed readings joined in x order (the raw measurement trace)
//! - the fitted line across the observed x-range
//! - a legend with the fitted equation and r²
//!
//! All styling is local to this module.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::FitReport;
use crate::error::AppError;
use crate::report::fmt_num;

/// Axis labels and caption for a chart.
#[derive(Debug, Clone)]
pub struct ChartLabels<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// Render the fit to an SVG file.
pub fn write_svg_chart(path: &Path, report: &FitReport, labels: &ChartLabels<'_>, size: (u32, u32)) -> Result<(), AppError> {
    draw_chart(path, report, labels, size)
        .map_err(|e| AppError::new(2, format!("Failed to render SVG chart '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), "wrote SVG chart");
    Ok(())
}

fn draw_chart(
    path: &Path,
    report: &FitReport,
    labels: &ChartLabels<'_>,
    size: (u32, u32),
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = &report.stats;
    let (x0, x1) = pad_range(stats.x_min, stats.x_max);
    let line = [
        (stats.x_min, report.predict(stats.x_min)),
        (stats.x_max, report.predict(stats.x_max)),
    ];
    let y_lo = stats.y_min.min(line[0].1).min(line[1].1);
    let y_hi = stats.y_max.max(line[0].1).max(line[1].1);
    let (y0, y1) = pad_range(y_lo, y_hi);

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, ("sans-serif", 22))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(labels.x_label)
        .y_desc(labels.y_label)
        .light_line_style(RGBColor(230, 230, 230))
        .draw()?;

    let data_color = RGBColor(0x1f, 0x77, 0xb4);
    let fit_color = RGBColor(0xff, 0x7f, 0x0e);

    // 1) Observed readings, joined in x order.
    let observed: Vec<(f64, f64)> = report.observations.iter().map(|o| (o.x, o.y)).collect();
    chart
        .draw_series(LineSeries::new(observed.iter().copied(), data_color.stroke_width(2)))?
        .label("observed")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], data_color.stroke_width(2)));
    chart.draw_series(
        observed
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 4, data_color.filled())),
    )?;

    // 2) Fitted line.
    let fit = &report.fit;
    let fit_label = format!(
        "weighted fit: y = {}x {} {}, R^2 = {:.6}",
        fmt_num(fit.slope),
        if fit.intercept < 0.0 { "-" } else { "+" },
        fmt_num(fit.intercept.abs()),
        fit.r_squared
    );
    chart
        .draw_series(LineSeries::new(line, fit_color.stroke_width(3)))?
        .label(fit_label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], fit_color.stroke_width(3)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { min.abs().max(1.0) * 0.05 };
    (min - pad, max + pad)
}
