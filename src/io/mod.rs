//! Input/output helpers.
//!
//! - CSV ingest of two measurement columns (`ingest`)
//! - report JSON read/write (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
