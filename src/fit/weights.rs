//! Observation weights from repeated readings.
//!
//! A reading taken several times at the same x is trusted more: every observation
//! gets the multiplicity of its x-value as weight. Grouping uses exact `f64`
//! equality with no tolerance, so `1.0` and `1.0000001` are different readings.

use crate::data::ObservationSet;
use crate::domain::{DuplicateGroup, SortOrder, WeightVector};

/// Derive one weight per observation from x multiplicity.
///
/// Emits one `info` event per duplicated x-value.
pub fn derive_weights(set: &ObservationSet) -> WeightVector {
    let points = set.points();
    let mut weights = Vec::with_capacity(points.len());
    let mut duplicates = Vec::new();

    // The set is sorted by x, so equal x-values are contiguous.
    let mut start = 0;
    while start < points.len() {
        let x = points[start].x;
        let mut end = start + 1;
        while end < points.len() && points[end].x == x {
            end += 1;
        }
        let count = end - start;
        weights.extend(std::iter::repeat_n(count as f64, count));
        if count > 1 {
            duplicates.push(DuplicateGroup { x, count });
        }
        start = end;
    }

    if set.order() == SortOrder::Descending {
        duplicates.reverse();
    }

    for group in &duplicates {
        tracing::info!(x = group.x, count = group.count, "repeated x-value weighted by multiplicity");
    }

    WeightVector { weights, duplicates }
}
