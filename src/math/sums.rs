//! Weighted moment accumulation for a straight-line fit.
//!
//! The raw sums `S_w, S_wx, S_wy, S_wxx, S_wxy` define the normal equations. Solving
//! from them directly loses everything to cancellation once x carries a large offset
//! (timestamps, absolute temperatures), so the solve uses sums of deviations from the
//! weighted means instead:
//!
//! ```text
//! S_w·S_wxx − S_wx²        = S_w·Σ w_i (x_i − x̄)²
//! S_w·S_wxy − S_wx·S_wy    = S_w·Σ w_i (x_i − x̄)(y_i − ȳ)
//! ```

/// Weighted sums for the normal equations of `y = k·x + b`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedSums {
    pub s_w: f64,
    pub s_wx: f64,
    pub s_wy: f64,
    pub s_wxx: f64,
    pub s_wxy: f64,
    /// Weighted mean of x.
    pub x_mean: f64,
    /// Weighted mean of y.
    pub y_mean: f64,
    /// `Σ w_i (x_i − x̄)²`
    pub s_wdxx: f64,
    /// `Σ w_i (x_i − x̄)(y_i − ȳ)`
    pub s_wdxdy: f64,
    /// False when every x is the same value.
    pub x_varies: bool,
}

impl WeightedSums {
    /// Accumulate over parallel slices (two passes: raw sums, then deviations).
    ///
    /// Callers guarantee equal lengths; extra elements of a longer slice are ignored.
    pub fn accumulate(x: &[f64], y: &[f64], w: &[f64]) -> Self {
        let mut s = Self::default();
        let mut first_x = None;
        for ((&xi, &yi), &wi) in x.iter().zip(y).zip(w) {
            match first_x {
                None => first_x = Some(xi),
                Some(x0) => s.x_varies |= xi != x0,
            }
            let wx = wi * xi;
            s.s_w += wi;
            s.s_wx += wx;
            s.s_wy += wi * yi;
            s.s_wxx += wx * xi;
            s.s_wxy += wx * yi;
        }
        if s.s_w == 0.0 {
            return s;
        }

        s.x_mean = s.s_wx / s.s_w;
        s.y_mean = s.s_wy / s.s_w;
        for ((&xi, &yi), &wi) in x.iter().zip(y).zip(w) {
            let dx = xi - s.x_mean;
            s.s_wdxx += wi * dx * dx;
            s.s_wdxdy += wi * dx * (yi - s.y_mean);
        }
        s
    }

    /// `S_w·S_wxx − S_wx²`, the determinant of the normal-equation matrix,
    /// evaluated from the deviation sums.
    pub fn determinant(&self) -> f64 {
        self.s_w * self.s_wdxx
    }

    /// True when the normal equations have no unique solution: all x equal, or the
    /// sums overflowed.
    pub fn is_singular(&self) -> bool {
        let d = self.determinant();
        !self.x_varies || d == 0.0 || !d.is_finite()
    }
}
