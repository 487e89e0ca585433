//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observations and their ordering (`Observation`, `SortOrder`, `DatasetStats`)
//! - derived weights (`WeightVector`, `DuplicateGroup`)
//! - fit outputs (`FitResult`, `DerivedQuantity`, `FitReport`)
//! - run configuration (`RunConfig`, `InputSource`)

pub mod types;

pub use types::*;
