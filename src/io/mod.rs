//! Input/output helpers.
//!
//! - run JSON read/write (`run`)
//! - per-trial interval CSV export (`export`)

pub mod export;
pub mod run;

pub use export::*;
pub use run::*;
