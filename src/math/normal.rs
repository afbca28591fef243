//! The Normal law: closed-form density and the standard quantile function.

use std::f64::consts::PI;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::AppError;

/// Density of `Normal(mean, std_dev)` at `x`.
///
/// Evaluated as `exp(-z²/2) / (σ·√(2π))`, so at `x == mean` the result is
/// exactly `1 / (σ·√(2π))`.
///
/// `std_dev` must be finite and positive; callers obtain it from
/// `AsymptoticParameters::standard_error`, which enforces that.
pub(crate) fn normal_density(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * PI).sqrt())
}

/// Inverse standard Normal CDF `Φ⁻¹(p)` for `p ∈ (0, 1)`.
pub fn standard_normal_quantile(p: f64) -> Result<f64, AppError> {
    if !(p.is_finite() && p > 0.0 && p < 1.0) {
        return Err(AppError::invalid_config(format!(
            "Quantile probability {p} must lie strictly between 0 and 1."
        )));
    }
    let standard = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::numeric(format!("Standard Normal construction failed: {e}")))?;
    let z = standard.inverse_cdf(p);
    if !z.is_finite() {
        return Err(AppError::numeric(format!("Non-finite Normal quantile at p={p}.")));
    }
    Ok(z)
}
