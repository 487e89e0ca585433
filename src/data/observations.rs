//! Validated, ordered collection of paired measurements.
//!
//! Raw input arrives as two parallel columns where a cell may be missing (an empty
//! spreadsheet cell, or NaN). Pairs with a missing value are dropped; what remains
//! is sorted by x (stable, so repeated readings keep their input order) and frozen.

use crate::domain::{DatasetStats, Observation, SortOrder};
use crate::error::{FitError, Result};

/// Ordered observations, at least 2 of them, all finite.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    points: Vec<Observation>,
    order: SortOrder,
    n_dropped: usize,
}

impl ObservationSet {
    /// Build a set from columns that may contain absent values.
    ///
    /// A pair is dropped when either side is `None` or NaN. Infinite values are
    /// rejected outright since they cannot be a reading.
    pub fn build(xs: &[Option<f64>], ys: &[Option<f64>], order: SortOrder) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(FitError::Validation(format!(
                "x and y columns differ in length ({} vs {})",
                xs.len(),
                ys.len()
            )));
        }

        let mut points = Vec::with_capacity(xs.len());
        let mut n_dropped = 0usize;
        for (i, (x, y)) in xs.iter().zip(ys.iter()).enumerate() {
            let (Some(x), Some(y)) = (present(*x), present(*y)) else {
                n_dropped += 1;
                continue;
            };
            if x.is_infinite() || y.is_infinite() {
                return Err(FitError::Validation(format!(
                    "non-finite value at row {i}: x={x}, y={y}"
                )));
            }
            points.push(Observation { x, y });
        }

        if n_dropped > 0 {
            tracing::info!(n_dropped, "dropped rows with a missing x or y value");
        }

        if points.len() < 2 {
            return Err(FitError::Validation(format!(
                "need at least 2 complete observations for a linear fit, got {}",
                points.len()
            )));
        }

        // `sort_by` is stable: equal x-values keep their input order.
        match order {
            SortOrder::Ascending => points.sort_by(|a, b| a.x.total_cmp(&b.x)),
            SortOrder::Descending => points.sort_by(|a, b| b.x.total_cmp(&a.x)),
        }

        Ok(Self {
            points,
            order,
            n_dropped,
        })
    }

    /// Build a set from fully populated columns.
    pub fn from_values(xs: &[f64], ys: &[f64], order: SortOrder) -> Result<Self> {
        let xs: Vec<Option<f64>> = xs.iter().copied().map(Some).collect();
        let ys: Vec<Option<f64>> = ys.iter().copied().map(Some).collect();
        Self::build(&xs, &ys, order)
    }

    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed set; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn n_dropped(&self) -> usize {
        self.n_dropped
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.points.iter().map(|p| p.x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.points.iter().map(|p| p.y)
    }

    pub fn stats(&self) -> DatasetStats {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for p in &self.points {
            x_min = x_min.min(p.x);
            x_max = x_max.max(p.x);
            y_min = y_min.min(p.y);
            y_max = y_max.max(p.y);
        }
        DatasetStats {
            n_points: self.points.len(),
            n_dropped: self.n_dropped,
            x_min,
            x_max,
            y_min,
            y_max,
            order: self.order,
        }
    }
}

fn present(v: Option<f64>) -> Option<f64> {
    v.filter(|v| !v.is_nan())
}
