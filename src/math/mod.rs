//! Mathematical utilities: weighted moments and the straight-line normal equations.

pub mod ols;
pub mod sums;

pub use ols::*;
pub use sums::*;
