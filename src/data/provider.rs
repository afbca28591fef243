//! Random sample blocks for the supported base distributions.
//!
//! The provider never owns a generator: callers pass an explicit `Rng`, so a
//! seeded `StdRng` gives bit-identical blocks and concurrent runs never share
//! generator state.

use log::debug;
use nalgebra::DMatrix;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Bernoulli, Distribution, Exp, Uniform};

use crate::domain::{BERNOULLI_P, DistributionSpec, SimulationConfig};
use crate::error::AppError;

/// Concrete sampler for one `DistributionSpec`.
#[derive(Debug, Clone, Copy)]
pub enum Sampler {
    Uniform(Uniform<f64>),
    Exponential(Exp<f64>),
    Bernoulli(Bernoulli),
}

impl Sampler {
    pub fn for_spec(spec: DistributionSpec) -> Result<Self, AppError> {
        match spec {
            DistributionSpec::Uniform => Ok(Sampler::Uniform(Uniform::new(0.0, 1.0))),
            DistributionSpec::Exponential => Exp::new(1.0)
                .map(Sampler::Exponential)
                .map_err(|e| AppError::invalid_config(format!("Exponential sampler error: {e}"))),
            DistributionSpec::Bernoulli => Bernoulli::new(BERNOULLI_P)
                .map(Sampler::Bernoulli)
                .map_err(|e| AppError::invalid_config(format!("Bernoulli sampler error: {e}"))),
        }
    }
}

impl Distribution<f64> for Sampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Sampler::Uniform(d) => d.sample(rng),
            Sampler::Exponential(d) => d.sample(rng),
            Sampler::Bernoulli(d) => {
                if d.sample(rng) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// An `N × n` block of independent draws: one row per trial.
#[derive(Debug, Clone)]
pub struct SampleBlock {
    pub draws: DMatrix<f64>,
    pub mean: f64,
    pub variance: f64,
}

impl SampleBlock {
    pub fn trials(&self) -> usize {
        self.draws.nrows()
    }

    pub fn sample_size(&self) -> usize {
        self.draws.ncols()
    }
}

/// Draw a `trials × sample_size` block from `spec`.
///
/// Draws are generated row-major (trial 0 first), so the block depends only on
/// the generator state.
pub fn sample<R: Rng + ?Sized>(
    spec: DistributionSpec,
    trials: usize,
    sample_size: usize,
    rng: &mut R,
) -> Result<SampleBlock, AppError> {
    if trials == 0 || sample_size == 0 {
        return Err(AppError::invalid_config(format!(
            "Sample block needs at least one trial and one draw (got N={trials}, n={sample_size})."
        )));
    }

    let sampler = Sampler::for_spec(spec)?;
    let data: Vec<f64> = (0..trials * sample_size)
        .map(|_| sampler.sample(&mut *rng))
        .collect();

    debug!(
        "sampled {trials}x{sample_size} block from {}",
        spec.display_name()
    );

    Ok(SampleBlock {
        draws: DMatrix::from_row_slice(trials, sample_size, &data),
        mean: spec.mean(),
        variance: spec.variance(),
    })
}

/// Generator seed for a run: mixes the user seed with every parameter that
/// shapes the draws, so distinct configurations get distinct streams.
///
/// The mix is a fixed SplitMix64 chain, so a (config, seed) pair maps to the
/// same stream on every platform and toolchain.
pub fn derive_seed(config: &SimulationConfig, user_seed: u64) -> u64 {
    let words = [
        distribution_tag(config.distribution()),
        config.sample_size() as u64,
        config.trial_count() as u64,
        config.confidence_level().to_bits(),
    ];
    words
        .into_iter()
        .fold(splitmix64(user_seed), |acc, word| splitmix64(acc ^ word))
}

fn distribution_tag(spec: DistributionSpec) -> u64 {
    match spec {
        DistributionSpec::Uniform => 0,
        DistributionSpec::Exponential => 1,
        DistributionSpec::Bernoulli => 2,
    }
}

/// One SplitMix64 output step for state `z`.
fn splitmix64(z: u64) -> u64 {
    let mut z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Owned generator for one run.
pub fn seeded_rng(config: &SimulationConfig, user_seed: u64) -> StdRng {
    StdRng::seed_from_u64(derive_seed(config, user_seed))
}

/// A fresh user seed drawn from OS-seeded entropy.
pub fn fresh_seed() -> u64 {
    rand::random()
}
