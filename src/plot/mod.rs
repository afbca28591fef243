//! Terminal plots for the trial-mean histogram and the interval strip.

pub mod ascii;

pub use ascii::*;
