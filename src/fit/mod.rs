//! The fitting engine.
//!
//! Responsibilities:
//!
//! - derive weights from repeated x readings
//! - fit `y = k·x + b` by weighted least squares, with parameter covariance
//! - evaluate r²
//! - propagate parameter uncertainty into derived physical quantities

pub mod fitter;
pub mod goodness;
pub mod propagate;
pub mod transforms;
pub mod weights;

pub use fitter::*;
pub use goodness::*;
pub use propagate::*;
pub use transforms::*;
pub use weights::*;
