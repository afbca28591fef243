//! Known-variance confidence intervals and their empirical coverage.
//!
//! Each trial mean `m` gets the interval `m ± z·se` with
//! `z = Φ⁻¹((1 + level) / 2)` and the *theoretical* standard error
//! `se = sqrt(sigma2 / n)` (not a Student-t interval). Coverage is the share
//! of intervals containing the population mean, counted over every trial.

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AsymptoticParameters, COVERAGE_ADVISORY_MARGIN, ConfidenceInterval, CoverageResult, CoverageStatus,
    validate_confidence_level,
};
use crate::error::AppError;
use crate::math::standard_normal_quantile;

/// Intervals for every trial plus the aggregate coverage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    pub z: f64,
    pub standard_error: f64,
    pub result: CoverageResult,
    /// All intervals, in trial order.
    pub intervals: Vec<ConfidenceInterval>,
}

impl CoverageReport {
    /// The first `k` intervals, for display only.
    pub fn preview(&self, k: usize) -> &[ConfidenceInterval] {
        &self.intervals[..k.min(self.intervals.len())]
    }
}

/// Two-sided critical value for `level`.
pub fn z_critical(level: f64) -> Result<f64, AppError> {
    validate_confidence_level(level)?;
    standard_normal_quantile((1.0 + level) / 2.0)
}

/// `Degraded` when coverage falls below `level - 0.02`.
pub fn classify(coverage: f64, level: f64) -> CoverageStatus {
    if coverage < level - COVERAGE_ADVISORY_MARGIN {
        CoverageStatus::Degraded
    } else {
        CoverageStatus::Nominal
    }
}

/// Build one interval per trial mean and measure how often `mu` is covered.
pub fn evaluate_coverage(
    means: &[f64],
    mu: f64,
    sigma2: f64,
    n: usize,
    level: f64,
) -> Result<CoverageReport, AppError> {
    if means.is_empty() {
        return Err(AppError::invalid_config("No trial means to evaluate."));
    }

    let z = z_critical(level)?;
    let se = AsymptoticParameters::from_population(mu, sigma2, n)?.standard_error()?;
    let half_width = z * se;

    let intervals: Vec<ConfidenceInterval> = means
        .par_iter()
        .map(|&m| {
            let lower = m - half_width;
            let upper = m + half_width;
            ConfidenceInterval {
                trial_mean: m,
                lower,
                upper,
                covers_true_mean: lower <= mu && upper >= mu,
            }
        })
        .collect();

    let covered = intervals.par_iter().filter(|ci| ci.covers_true_mean).count();
    let empirical_coverage = covered as f64 / intervals.len() as f64;
    let status = classify(empirical_coverage, level);

    debug!("z={z:.6} se={se:.6} covered={covered}/{}", intervals.len());
    if status == CoverageStatus::Degraded {
        warn!(
            "empirical coverage {:.2}% is below the {:.0}% nominal level (n={n}); the Normal approximation is still poor",
            empirical_coverage * 100.0,
            level * 100.0
        );
    }

    Ok(CoverageReport {
        z,
        standard_error: se,
        result: CoverageResult {
            empirical_coverage,
            covered,
            trials: intervals.len(),
            confidence_level: level,
            status,
        },
        intervals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use test_log::test;

    use crate::domain::DistributionSpec;
    use crate::error::ErrorKind;
    use crate::sim::run_trials;

    #[test]
    fn z_for_95_percent() {
        let z = z_critical(0.95).unwrap();
        assert!((z - 1.959964).abs() < 1e-6);
    }

    #[test]
    fn intervals_are_centred_on_trial_means() {
        let se = (0.25_f64 / 4.0).sqrt();
        let z = z_critical(0.95).unwrap();
        let means = [0.9, 0.5, 10.0];
        let report = evaluate_coverage(&means, 0.5, 0.25, 4, 0.95).unwrap();

        assert_eq!(report.intervals.len(), 3);
        assert!(report.intervals[0].covers_true_mean);
        assert!(report.intervals[1].covers_true_mean);
        assert!(!report.intervals[2].covers_true_mean);
        assert_eq!(report.intervals[1].lower, 0.5 - z * se);
        assert_eq!(report.intervals[1].upper, 0.5 + z * se);
        assert_eq!(report.result.trials, 3);
    }

    #[test]
    fn coverage_counts_all_trials_not_preview() {
        // First 50 miss, remaining 150 hit.
        let mut means = vec![5.0; 50];
        means.extend(std::iter::repeat(1.0).take(150));
        let report = evaluate_coverage(&means, 1.0, 1.0, 10, 0.95).unwrap();

        assert!(report.preview(50).iter().all(|ci| !ci.covers_true_mean));
        assert_eq!(report.result.covered, 150);
        assert!((report.result.empirical_coverage - 0.75).abs() < 1e-12);
        assert_eq!(report.result.status, CoverageStatus::Degraded);
    }

    #[test]
    fn preview_is_clamped() {
        let report = evaluate_coverage(&[0.4, 0.6], 0.5, 1.0 / 12.0, 3, 0.95).unwrap();
        assert_eq!(report.preview(50).len(), 2);
    }

    #[test]
    fn minimum_trial_count_gives_valid_fraction() {
        let mut rng = StdRng::seed_from_u64(11);
        let run = run_trials(DistributionSpec::Exponential, 3, 100, &mut rng).unwrap();
        let report = evaluate_coverage(&run.means, run.population_mean, run.population_variance, 3, 0.95).unwrap();
        let c = report.result.empirical_coverage;
        assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn empty_means_and_zero_n_are_rejected() {
        let err = evaluate_coverage(&[], 0.5, 0.25, 10, 0.95).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);

        let err = evaluate_coverage(&[0.5], 0.5, 0.25, 0, 0.95).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericDegeneracy);
    }

    #[test]
    fn bernoulli_coverage_converges_with_n() {
        let spec = DistributionSpec::Bernoulli;
        let coverage_at = |n: usize| {
            let mut rng = StdRng::seed_from_u64(314);
            let run = run_trials(spec, n, 5000, &mut rng).unwrap();
            evaluate_coverage(&run.means, spec.mean(), spec.variance(), n, 0.95)
                .unwrap()
                .result
        };

        // n=1: every mean is 0 or 1, 0.5 away from mu, inside the 0.98 half-width.
        assert_eq!(coverage_at(1).empirical_coverage, 1.0);

        // n=4: means 0 and 1 (probability 1/8) fall outside the 0.49 half-width.
        let small = coverage_at(4);
        assert!((small.empirical_coverage - 0.875).abs() < 0.02, "n=4: {}", small.empirical_coverage);
        assert_eq!(small.status, CoverageStatus::Degraded);

        let large = coverage_at(100).empirical_coverage;
        assert!((large - 0.95).abs() < 0.02, "n=100: {large}");
    }
}
