//! CLT prediction for the sampling distribution of the mean.
//!
//! For `n` i.i.d. draws with mean `mu` and variance `sigma2`, the sample mean
//! is approximately `Normal(mu, sigma2 / n)`. The approximation is exact only
//! in the limit; for `n = 1` and a non-Normal base the overlay is a poor fit,
//! which is expected.

use crate::domain::AsymptoticParameters;
use crate::error::AppError;
use crate::math::{linspace, normal_density};

impl AsymptoticParameters {
    /// `(mu, sigma2 / n)` for sample size `n`.
    pub fn from_population(mu: f64, sigma2: f64, n: usize) -> Result<Self, AppError> {
        if n == 0 {
            return Err(AppError::numeric("Sample size n=0 leaves the standard error undefined."));
        }
        if !(mu.is_finite() && sigma2.is_finite() && sigma2 >= 0.0) {
            return Err(AppError::numeric(format!(
                "Invalid population moments: mu={mu}, sigma2={sigma2}."
            )));
        }

        Ok(Self {
            mean: mu,
            variance: sigma2 / n as f64,
        })
    }

    /// Standard error `sqrt(sigma2 / n)`; must be finite and positive.
    pub fn standard_error(&self) -> Result<f64, AppError> {
        let se = self.variance.sqrt();
        if !(se.is_finite() && se > 0.0) {
            return Err(AppError::numeric(format!("Degenerate standard error {se}.")));
        }
        Ok(se)
    }

    /// Normal density of the predicted sampling distribution at `x`.
    pub fn density(&self, x: f64) -> Result<f64, AppError> {
        Ok(normal_density(x, self.mean, self.standard_error()?))
    }
}

/// `(x, density(x))` on `points` evenly spaced values across `[lo, hi]`.
pub fn overlay_curve(
    params: &AsymptoticParameters,
    lo: f64,
    hi: f64,
    points: usize,
) -> Result<Vec<(f64, f64)>, AppError> {
    let se = params.standard_error()?;
    Ok(linspace(lo, hi, points)
        .into_iter()
        .map(|x| (x, normal_density(x, params.mean, se)))
        .collect())
}
