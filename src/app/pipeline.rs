//! Shared simulation pipeline used by every front-end command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> sample -> reduce to trial means -> asymptotic model -> coverage
//!
//! The CLI commands then focus on presentation (printing, plotting, exports).

use log::info;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::coverage::{CoverageReport, evaluate_coverage};
use crate::data::seeded_rng;
use crate::domain::{AsymptoticParameters, CoverageResult, DistributionSpec, SimulationConfig};
use crate::error::AppError;
use crate::report::EmpiricalSummary;
use crate::sim::{TrialRun, run_trials};

/// All computed outputs of a single simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    pub config: SimulationConfig,
    /// User-level seed; replaying it with the same config reproduces the run.
    pub seed: u64,
    pub trials: TrialRun,
    pub asymptotic: AsymptoticParameters,
    pub coverage: CoverageReport,
    pub summary: EmpiricalSummary,
}

/// Execute the full pipeline with a generator derived from `config` and `seed`.
pub fn run_simulation(config: &SimulationConfig, seed: u64) -> Result<RunOutput, AppError> {
    let mut rng = seeded_rng(config, seed);
    run_simulation_with_rng(config, seed, &mut rng)
}

/// Execute the pipeline with a caller-owned generator.
///
/// `seed` is only recorded in the output.
pub fn run_simulation_with_rng<R: Rng + ?Sized>(
    config: &SimulationConfig,
    seed: u64,
    rng: &mut R,
) -> Result<RunOutput, AppError> {
    let spec = config.distribution();
    let n = config.sample_size();

    // 1) Trial means.
    let trials = run_trials(spec, n, config.trial_count(), rng)?;

    // 2) CLT prediction for the mean of n draws.
    let asymptotic = AsymptoticParameters::from_population(trials.population_mean, trials.population_variance, n)?;

    // 3) Intervals and coverage over all trials.
    let coverage = evaluate_coverage(
        &trials.means,
        trials.population_mean,
        trials.population_variance,
        n,
        config.confidence_level(),
    )?;

    let summary = EmpiricalSummary::from_means(&trials.means)?;

    info!(
        "{} n={} N={}: mean={:.4} var={:.6} (theory {:.4}/{:.6}), coverage={:.2}%",
        spec.display_name(),
        n,
        config.trial_count(),
        summary.mean,
        summary.variance,
        asymptotic.mean,
        asymptotic.variance,
        coverage.result.empirical_coverage * 100.0
    );

    Ok(RunOutput {
        config: *config,
        seed,
        trials,
        asymptotic,
        coverage,
        summary,
    })
}

/// One row of a sample-size sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub sample_size: usize,
    pub theoretical_variance: f64,
    pub empirical_variance: f64,
    pub coverage: CoverageResult,
}

/// Coverage for each sample size in `sizes`.
///
/// Every size is validated before any sampling starts. Sizes run in parallel,
/// each with its own derived generator, so the rows do not depend on scheduling.
pub fn run_sweep(
    distribution: DistributionSpec,
    sizes: &[usize],
    trials: usize,
    level: f64,
    seed: u64,
) -> Result<Vec<SweepRow>, AppError> {
    if sizes.is_empty() {
        return Err(AppError::invalid_config("Sweep needs at least one sample size."));
    }

    let configs = sizes
        .iter()
        .map(|&n| SimulationConfig::new(distribution, n, trials, level))
        .collect::<Result<Vec<_>, _>>()?;

    configs
        .par_iter()
        .map(|config| {
            let run = run_simulation(config, seed)?;
            Ok(SweepRow {
                sample_size: config.sample_size(),
                theoretical_variance: run.asymptotic.variance,
                empirical_variance: run.summary.variance,
                coverage: run.coverage.result,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    use crate::domain::DEFAULT_CONFIDENCE_LEVEL;
    use crate::error::ErrorKind;

    #[test]
    fn uniform_end_to_end() {
        let config = SimulationConfig::new(DistributionSpec::Uniform, 30, 2000, DEFAULT_CONFIDENCE_LEVEL).unwrap();
        let run = run_simulation(&config, 42).unwrap();

        assert_eq!(run.trials.means.len(), 2000);
        assert_eq!(run.coverage.intervals.len(), 2000);
        assert_eq!(run.asymptotic.mean, 0.5);
        assert!((run.asymptotic.variance - 0.002_778).abs() < 1e-6);
        assert!((run.coverage.standard_error - 0.0527).abs() < 1e-4);
        assert!((run.coverage.z - 1.95996).abs() < 1e-5);

        let c = run.coverage.result.empirical_coverage;
        assert!((0.93..=0.97).contains(&c), "coverage = {c}");
    }

    #[test]
    fn same_seed_reproduces_run() {
        let config = SimulationConfig::new(DistributionSpec::Exponential, 8, 500, DEFAULT_CONFIDENCE_LEVEL).unwrap();
        let a = run_simulation(&config, 7).unwrap();
        let b = run_simulation(&config, 7).unwrap();
        let c = run_simulation(&config, 8).unwrap();
        assert_eq!(a.trials.means, b.trials.means);
        assert_ne!(a.trials.means, c.trials.means);
    }

    #[test]
    fn sweep_validates_every_size_first() {
        let err = run_sweep(DistributionSpec::Bernoulli, &[5, 0, 30], 500, 0.95, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        assert!(run_sweep(DistributionSpec::Bernoulli, &[], 500, 0.95, 1).is_err());
    }

    #[test]
    fn sweep_rows_follow_input_order() {
        let rows = run_sweep(DistributionSpec::Exponential, &[1, 10, 100], 1000, 0.95, 3).unwrap();
        let sizes: Vec<usize> = rows.iter().map(|r| r.sample_size).collect();
        assert_eq!(sizes, vec![1, 10, 100]);
        assert_eq!(rows[1].theoretical_variance, 0.1);
        assert!(rows.iter().all(|r| (0.0..=1.0).contains(&r.coverage.empirical_coverage)));
    }
}
