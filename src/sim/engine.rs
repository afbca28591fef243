//! Monte Carlo engine: `N` trials of size `n`, one sample mean per trial.

use log::debug;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::{SampleBlock, sample};
use crate::domain::DistributionSpec;
use crate::error::AppError;

/// Trial means of one run plus the population moments they estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRun {
    /// One mean per trial, in trial order.
    pub means: Vec<f64>,
    pub population_mean: f64,
    pub population_variance: f64,
    pub sample_size: usize,
}

/// Draw `trials × sample_size` values from `spec` and reduce each row to its mean.
pub fn run_trials<R: Rng + ?Sized>(
    spec: DistributionSpec,
    sample_size: usize,
    trials: usize,
    rng: &mut R,
) -> Result<TrialRun, AppError> {
    let block = sample(spec, trials, sample_size, rng)?;
    let means = row_means(&block);

    debug!("reduced {} trials of size {}", means.len(), sample_size);

    Ok(TrialRun {
        means,
        population_mean: block.mean,
        population_variance: block.variance,
        sample_size,
    })
}

/// Per-row arithmetic means, computed in parallel and collected in row order.
pub fn row_means(block: &SampleBlock) -> Vec<f64> {
    let n = block.sample_size() as f64;
    (0..block.trials())
        .into_par_iter()
        .map(|i| block.draws.row(i).sum() / n)
        .collect()
}
