//! Observation data.
//!
//! Responsibilities:
//!
//! - validate paired measurements
//! - drop incomplete pairs
//! - fix a deterministic x ordering for weighting and plotting

pub mod observations;

pub use observations::*;
