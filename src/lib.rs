//! `labfit` library crate.
//!
//! The binary (`labfit`) is a thin wrapper around this library so that:
//!
//! - the fitting engine is testable without spawning processes
//! - the engine (`data`, `fit`, `math`, `report`) has no I/O and can be embedded elsewhere
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
