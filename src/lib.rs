//! `clt-sim` library crate.
//!
//! Monte Carlo demonstration of the Central Limit Theorem: sample means of
//! `n` draws from a base distribution, the Normal law the CLT predicts for
//! them, and the empirical coverage of known-variance confidence intervals.
//!
//! The binary (`clt`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the simulation pipeline is reusable by other front-ends

pub mod app;
pub mod cli;
pub mod coverage;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod sim;
