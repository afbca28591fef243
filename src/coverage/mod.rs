//! Confidence-interval coverage.
//!
//! Responsibilities:
//!
//! - compute the two-sided critical value for the configured level
//! - build one known-variance interval per trial (parallel, order-preserving)
//! - aggregate coverage over all trials and flag degraded coverage

pub mod evaluator;

pub use evaluator::*;
