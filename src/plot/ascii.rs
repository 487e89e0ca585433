//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o` (`O` where several readings share a cell)
//! - fitted line: `-`

use crate::domain::FitReport;

/// Render observed points and the fitted line.
pub fn render_ascii_plot(report: &FitReport, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(report).unwrap_or((0.0, 1.0));
    let line = [(x_min, report.predict(x_min)), (x_max, report.predict(x_max))];

    let (y_min, y_max) = y_range(report, &line).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw the line first (so points can overlay).
    let (lx0, ly0) = (map_x(line[0].0, x_min, x_max, width), map_y(line[0].1, y_min, y_max, height));
    let (lx1, ly1) = (map_x(line[1].0, x_min, x_max, width), map_y(line[1].1, y_min, y_max, height));
    draw_line(&mut grid, lx0, ly0, lx1, ly1, '-');

    for o in &report.observations {
        let x = map_x(o.x, x_min, x_max, width);
        let y = map_y(o.y, y_min, y_max, height);
        grid[y][x] = match grid[y][x] {
            'o' | 'O' => 'O',
            _ => 'o',
        };
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}] | R^2={:.6}\n",
        report.fit.r_squared
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(report: &FitReport) -> Option<(f64, f64)> {
    let (min_x, max_x) = (report.stats.x_min, report.stats.x_max);
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(report: &FitReport, line: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = report.stats.y_min;
    let mut max_y = report.stats.y_max;
    for &(_, y) in line {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
