//! Formatted terminal output.
//!
//! We keep formatting code in one place so the engine stays free of printing and
//! output changes stay localized.

use crate::domain::{DerivedQuantity, FitReport, SortOrder};
use crate::report::{ResidualRow, residual_rows};

const RULE_WIDTH: usize = 72;

/// Format the run summary: dataset, weights, fit parameters, derived quantities.
pub fn format_report(report: &FitReport, source: &str) -> String {
    let mut out = String::new();
    let fit = &report.fit;
    let stats = &report.stats;

    out.push_str(&format!("=== labfit - weighted linear fit: {source} ===\n"));
    out.push_str(&format!(
        "Points: n={} (dropped {}) | x=[{}, {}] | y=[{}, {}] | order={}\n",
        stats.n_points,
        stats.n_dropped,
        fmt_num(stats.x_min),
        fmt_num(stats.x_max),
        fmt_num(stats.y_min),
        fmt_num(stats.y_max),
        match stats.order {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    ));

    if report.weights.has_no_duplicates() {
        out.push_str("Weights: uniform (no repeated x-values)\n");
    } else {
        out.push_str("Weights: repeated x-values weighted by multiplicity\n");
        for group in &report.weights.duplicates {
            out.push_str(&format!(
                "  - x={} occurs {} times, weight {}\n",
                fmt_num(group.x),
                group.count,
                group.count
            ));
        }
    }

    out.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));
    out.push_str(&format!(
        "Fit: y = {} * x {} {}\n",
        fmt_num(fit.slope),
        if fit.intercept < 0.0 { "-" } else { "+" },
        fmt_num(fit.intercept.abs())
    ));
    match &fit.covariance {
        Some(cov) => {
            out.push_str(&format!(
                "- slope k     : {} +/- {}\n",
                fmt_num(fit.slope),
                fmt_num(cov.slope_std_err())
            ));
            out.push_str(&format!(
                "- intercept b : {} +/- {}\n",
                fmt_num(fit.intercept),
                fmt_num(cov.intercept_std_err())
            ));
            out.push_str(&format!("- cov(k, b)   : {}\n", fmt_num(cov.cov_slope_intercept)));
        }
        None => {
            out.push_str(&format!("- slope k     : {}\n", fmt_num(fit.slope)));
            out.push_str(&format!("- intercept b : {}\n", fmt_num(fit.intercept)));
            out.push_str("- parameter errors undefined (0 residual degrees of freedom)\n");
        }
    }
    out.push_str(&format!("- R^2         : {:.6}\n", fit.r_squared));
    out.push_str(&format!("- weighted SSE: {} (dof={})\n", fmt_num(fit.weighted_sse), fit.dof));

    if !report.derived.is_empty() {
        out.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));
        out.push_str("Derived quantities:\n");
        for q in &report.derived {
            out.push_str(&format_derived(q));
        }
    }
    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));

    out
}

fn format_derived(q: &DerivedQuantity) -> String {
    let mut out = format!(
        "- {}: {} +/- {} (relative uncertainty {:.4}%)\n",
        q.label,
        fmt_num(q.value),
        fmt_num(q.standard_error),
        q.relative_uncertainty
    );
    if let (Some(reference), Some(deviation)) = (q.reference_value, q.relative_deviation) {
        out.push_str(&format!(
            "  reference {} -> relative deviation {:+.4}%\n",
            fmt_num(reference),
            deviation
        ));
    }
    out
}

/// Format the per-observation residual table.
pub fn format_residual_table(report: &FitReport) -> String {
    let rows = residual_rows(report);
    let mut out = String::new();
    out.push_str(format!("{:>14} {:>14} {:>14} {:>14} {:>7}", "x", "y_obs", "y_fit", "residual", "weight").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<14} {:-<14} {:-<14} {:-<14} {:-<7}", "", "", "", "", "").trim_end());
    out.push('\n');
    for ResidualRow {
        x,
        y_obs,
        y_fit,
        residual,
        weight,
    } in rows
    {
        out.push_str(
            format!(
                "{:>14} {:>14} {:>14} {:>14} {:>7}",
                fmt_num(x),
                fmt_num(y_obs),
                fmt_num(y_fit),
                fmt_num(residual),
                weight
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Compact number formatting: fixed notation for moderate magnitudes, scientific otherwise.
pub fn fmt_num(v: f64) -> String {
    let a = v.abs();
    if v == 0.0 {
        "0".to_string()
    } else if !(1e-4..1e6).contains(&a) {
        format!("{v:.4e}")
    } else {
        let s = format!("{v:.6}");
        let s = s.trim_end_matches('0').trim_end_matches('.');
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ObservationSet;
    use crate::fit::DerivedSpec;
    use crate::report::analyze;

    #[test]
    fn fmt_num_switches_notation() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(-0.033333333), "-0.033333");
        assert_eq!(fmt_num(2.998e8), "2.9980e8");
        assert_eq!(fmt_num(1e-7), "1.0000e-7");
    }

    #[test]
    fn report_mentions_duplicates_and_derived() {
        let set = ObservationSet::from_values(
            &[10.0, 10.0, 20.0, 30.0, 40.0],
            &[0.34, 0.33, 0.67, 1.0, 1.34],
            SortOrder::Ascending,
        )
        .unwrap();
        let report = analyze(&set, &[DerivedSpec::speed_of_light()]).unwrap();
        let txt = format_report(&report, "inline");

        assert!(txt.contains("labfit - weighted linear fit: inline"));
        assert!(txt.contains("x=10 occurs 2 times, weight 2"));
        assert!(txt.contains("speed of light c (m/s)"));
        assert!(txt.contains("relative deviation"));
        assert!(txt.contains("R^2"));
    }

    #[test]
    fn report_without_covariance_says_so() {
        let set = ObservationSet::from_values(&[0.0, 1.0], &[0.0, 2.0], SortOrder::Ascending).unwrap();
        let report = analyze(&set, &[]).unwrap();
        let txt = format_report(&report, "two points");
        assert!(txt.contains("Weights: uniform"));
        assert!(txt.contains("parameter errors undefined"));
    }

    #[test]
    fn residual_table_has_a_row_per_observation() {
        let set = ObservationSet::from_values(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.5], SortOrder::Ascending).unwrap();
        let report = analyze(&set, &[]).unwrap();
        let table = format_residual_table(&report);
        assert_eq!(table.lines().count(), 2 + 3);
    }
}
