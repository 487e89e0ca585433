//! Chart rendering for fit reports.
//!
//! - terminal ASCII plot (`ascii`)
//! - SVG file chart (`svg`)

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;
