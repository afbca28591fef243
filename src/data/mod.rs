//! Random sample generation.
//!
//! - `provider`: samplers for the base distributions, `N × n` draw blocks,
//!   and reproducible seed derivation

pub mod provider;

pub use provider::*;
