//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a simulation run
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Smallest accepted sample size `n` (draws per trial).
pub const SAMPLE_SIZE_MIN: usize = 1;
/// Largest accepted sample size `n`.
pub const SAMPLE_SIZE_MAX: usize = 100;
/// Smallest accepted trial count `N`.
pub const TRIAL_COUNT_MIN: usize = 100;
/// Largest accepted trial count `N`.
pub const TRIAL_COUNT_MAX: usize = 10_000;

/// Nominal confidence level used when none is given.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Coverage this far below the nominal level is flagged as degraded
/// (0.93 at the default 95% level).
pub const COVERAGE_ADVISORY_MARGIN: f64 = 0.02;

/// Fixed success probability of the Bernoulli base distribution.
pub const BERNOULLI_P: f64 = 0.5;

/// Base distribution the trials draw from.
///
/// Each variant has fixed parameters; the population moments are closed-form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistributionSpec {
    /// Uniform on `[0, 1)`.
    #[value(alias = "unif")]
    Uniform,
    /// Exponential with rate 1 (mean 1).
    #[value(alias = "exp")]
    Exponential,
    /// Bernoulli with success probability 0.5.
    #[value(alias = "bern")]
    Bernoulli,
}

impl DistributionSpec {
    pub const ALL: [DistributionSpec; 3] = [
        DistributionSpec::Uniform,
        DistributionSpec::Exponential,
        DistributionSpec::Bernoulli,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            DistributionSpec::Uniform => "Uniform(0,1)",
            DistributionSpec::Exponential => "Exponential(rate=1)",
            DistributionSpec::Bernoulli => "Bernoulli(p=0.5)",
        }
    }

    /// Population mean `mu`.
    pub fn mean(self) -> f64 {
        match self {
            DistributionSpec::Uniform => 0.5,
            DistributionSpec::Exponential => 1.0,
            DistributionSpec::Bernoulli => BERNOULLI_P,
        }
    }

    /// Population variance `sigma2`.
    pub fn variance(self) -> f64 {
        match self {
            DistributionSpec::Uniform => 1.0 / 12.0,
            DistributionSpec::Exponential => 1.0,
            DistributionSpec::Bernoulli => BERNOULLI_P * (1.0 - BERNOULLI_P),
        }
    }
}

impl FromStr for DistributionSpec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "unif" => Ok(DistributionSpec::Uniform),
            "exponential" | "exp" => Ok(DistributionSpec::Exponential),
            "bernoulli" | "bern" => Ok(DistributionSpec::Bernoulli),
            other => Err(AppError::invalid_config(format!(
                "Unknown distribution '{other}' (expected uniform, exponential or bernoulli)."
            ))),
        }
    }
}

impl std::fmt::Display for DistributionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Validated parameters of one simulation run.
///
/// Construct through [`SimulationConfig::new`]; the fields are only readable
/// so a config that exists is always within bounds. Deserialization goes
/// through the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SimulationConfigRaw")]
pub struct SimulationConfig {
    distribution: DistributionSpec,
    sample_size: usize,
    trial_count: usize,
    confidence_level: f64,
}

impl SimulationConfig {
    pub fn new(
        distribution: DistributionSpec,
        sample_size: usize,
        trial_count: usize,
        confidence_level: f64,
    ) -> Result<Self, AppError> {
        validate_sample_size(sample_size)?;
        if !(TRIAL_COUNT_MIN..=TRIAL_COUNT_MAX).contains(&trial_count) {
            return Err(AppError::invalid_config(format!(
                "Trial count N={trial_count} is outside [{TRIAL_COUNT_MIN}, {TRIAL_COUNT_MAX}]."
            )));
        }
        validate_confidence_level(confidence_level)?;

        Ok(Self {
            distribution,
            sample_size,
            trial_count,
            confidence_level,
        })
    }

    pub fn distribution(&self) -> DistributionSpec {
        self.distribution
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Coverage below this value is reported as degraded.
    pub fn advisory_threshold(&self) -> f64 {
        self.confidence_level - COVERAGE_ADVISORY_MARGIN
    }
}

/// Unvalidated wire form of [`SimulationConfig`].
#[derive(Debug, Deserialize)]
struct SimulationConfigRaw {
    distribution: DistributionSpec,
    sample_size: usize,
    trial_count: usize,
    confidence_level: f64,
}

impl TryFrom<SimulationConfigRaw> for SimulationConfig {
    type Error = AppError;

    fn try_from(raw: SimulationConfigRaw) -> Result<Self, Self::Error> {
        SimulationConfig::new(raw.distribution, raw.sample_size, raw.trial_count, raw.confidence_level)
    }
}

pub fn validate_sample_size(sample_size: usize) -> Result<(), AppError> {
    if !(SAMPLE_SIZE_MIN..=SAMPLE_SIZE_MAX).contains(&sample_size) {
        return Err(AppError::invalid_config(format!(
            "Sample size n={sample_size} is outside [{SAMPLE_SIZE_MIN}, {SAMPLE_SIZE_MAX}]."
        )));
    }
    Ok(())
}

pub fn validate_confidence_level(level: f64) -> Result<(), AppError> {
    if !(level.is_finite() && level > 0.0 && level < 1.0) {
        return Err(AppError::invalid_config(format!(
            "Confidence level {level} must lie strictly between 0 and 1."
        )));
    }
    Ok(())
}

/// CLT-predicted sampling distribution of the mean: `Normal(mean, variance)`
/// with `variance = sigma2 / n`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsymptoticParameters {
    pub mean: f64,
    pub variance: f64,
}

/// One per-trial interval `mean ± z·se`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub trial_mean: f64,
    pub lower: f64,
    pub upper: f64,
    pub covers_true_mean: bool,
}

/// Advisory classification of an empirical coverage value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageStatus {
    /// Close enough to the nominal level.
    Nominal,
    /// Below the advisory threshold; typical for small `n` with a skewed or discrete base.
    Degraded,
}

/// Aggregate coverage over all trials of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageResult {
    pub empirical_coverage: f64,
    pub covered: usize,
    pub trials: usize,
    pub confidence_level: f64,
    pub status: CoverageStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn population_moments_are_closed_form() {
        assert_eq!(DistributionSpec::Uniform.mean(), 0.5);
        assert_eq!(DistributionSpec::Uniform.variance(), 1.0 / 12.0);
        assert_eq!(DistributionSpec::Exponential.mean(), 1.0);
        assert_eq!(DistributionSpec::Exponential.variance(), 1.0);
        assert_eq!(DistributionSpec::Bernoulli.mean(), 0.5);
        assert_eq!(DistributionSpec::Bernoulli.variance(), 0.25);
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("Uniform".parse::<DistributionSpec>().unwrap(), DistributionSpec::Uniform);
        assert_eq!(" exp ".parse::<DistributionSpec>().unwrap(), DistributionSpec::Exponential);
        assert_eq!("BERN".parse::<DistributionSpec>().unwrap(), DistributionSpec::Bernoulli);

        let err = "poisson".parse::<DistributionSpec>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn config_accepts_bounds() {
        assert!(SimulationConfig::new(DistributionSpec::Uniform, 1, 100, 0.95).is_ok());
        assert!(SimulationConfig::new(DistributionSpec::Uniform, 100, 10_000, 0.95).is_ok());
    }

    #[test]
    fn config_rejects_out_of_bounds() {
        let cases = [(0, 2000, 0.95), (101, 2000, 0.95), (30, 99, 0.95), (30, 10_001, 0.95)];
        for (n, trials, level) in cases {
            let err = SimulationConfig::new(DistributionSpec::Exponential, n, trials, level).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfiguration, "n={n}, N={trials}");
        }
    }

    #[test]
    fn config_rejects_bad_confidence_level() {
        for level in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = SimulationConfig::new(DistributionSpec::Bernoulli, 30, 2000, level).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        }
    }

    #[test]
    fn deserialized_config_is_validated() {
        let ok: SimulationConfig = serde_json::from_str(
            r#"{"distribution":"exponential","sample_size":10,"trial_count":500,"confidence_level":0.9}"#,
        )
        .unwrap();
        assert_eq!(ok, SimulationConfig::new(DistributionSpec::Exponential, 10, 500, 0.9).unwrap());

        let json = r#"{"distribution":"uniform","sample_size":500,"trial_count":20,"confidence_level":0.95}"#;
        let err = serde_json::from_str::<SimulationConfig>(json).unwrap_err();
        assert!(err.is_data(), "{err}");
        assert!(err.to_string().contains("Sample size n=500"), "{err}");
    }

    #[test]
    fn advisory_threshold_at_default_level() {
        let config = SimulationConfig::new(DistributionSpec::Uniform, 30, 2000, DEFAULT_CONFIDENCE_LEVEL).unwrap();
        assert!((config.advisory_threshold() - 0.93).abs() < 1e-12);
    }
}
