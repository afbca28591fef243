//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the base distribution selector (`DistributionSpec`)
//! - validated run parameters (`SimulationConfig`)
//! - derived outputs (`AsymptoticParameters`, `ConfidenceInterval`, `CoverageResult`)

pub mod types;

pub use types::*;
