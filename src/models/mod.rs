//! Asymptotic (Normal) model of the sample mean.

pub mod asymptotic;

pub use asymptotic::*;
