//! Mathematical utilities: descriptive statistics and the Normal law.

pub mod normal;
pub mod stats;

pub use normal::*;
pub use stats::*;
