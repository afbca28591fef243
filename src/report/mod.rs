//! Reporting utilities: empirical summaries, histograms, and formatted output.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::math::{mean, population_variance};

pub mod format;

pub use format::*;

/// Default number of histogram bins.
pub const DEFAULT_HISTOGRAM_BINS: usize = 40;
/// Default number of points on the Normal overlay.
pub const DEFAULT_OVERLAY_POINTS: usize = 100;
/// Default number of intervals shown in the interval strip.
pub const DEFAULT_INTERVAL_PREVIEW: usize = 50;

/// Empirical moments of the trial means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalSummary {
    pub mean: f64,
    /// Population variance (denominator `N`).
    pub variance: f64,
}

impl EmpiricalSummary {
    pub fn from_means(means: &[f64]) -> Result<Self, AppError> {
        let m = mean(means).ok_or_else(|| AppError::numeric("Cannot summarise empty or non-finite trial means."))?;
        let v = population_variance(means)
            .ok_or_else(|| AppError::numeric("Cannot summarise empty or non-finite trial means."))?;
        Ok(Self { mean: m, variance: v })
    }
}

/// Equal-width histogram normalised to unit area.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` edges, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// `counts[i] / (total * width)`.
    pub density: Vec<f64>,
}

impl Histogram {
    /// Bin `values` over `[min, max]`; the maximum lands in the last bin.
    ///
    /// If every value is equal the range is widened to `[v - 0.5, v + 0.5]`.
    pub fn from_values(values: &[f64], bins: usize) -> Result<Self, AppError> {
        if bins == 0 {
            return Err(AppError::invalid_config("Histogram needs at least one bin."));
        }
        if values.is_empty() || !values.iter().all(|v| v.is_finite()) {
            return Err(AppError::numeric("Cannot bin empty or non-finite values."));
        }

        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if hi <= lo {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges = crate::math::linspace(lo, hi, bins + 1);

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let total = values.len() as f64;
        let density = counts.iter().map(|&c| c as f64 / (total * width)).collect();

        Ok(Self { edges, counts, density })
    }

    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }

    pub fn bin_width(&self) -> f64 {
        let (lo, hi) = self.range();
        (hi - lo) / self.counts.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_uses_population_variance() {
        let s = EmpiricalSummary::from_means(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((s.mean - 2.5).abs() < 1e-15);
        assert!((s.variance - 1.25).abs() < 1e-12);
    }

    #[test]
    fn histogram_integrates_to_one() {
        let values: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37).sin()).collect();
        let h = Histogram::from_values(&values, 40).unwrap();
        assert_eq!(h.edges.len(), 41);
        assert_eq!(h.counts.iter().sum::<usize>(), 1000);
        let area: f64 = h.density.iter().map(|d| d * h.bin_width()).sum();
        assert!((area - 1.0).abs() < 1e-9);
    }

    #[test]
    fn max_value_lands_in_last_bin() {
        let h = Histogram::from_values(&[0.0, 0.5, 1.0], 2).unwrap();
        assert_eq!(h.counts, vec![1, 2]);
    }

    #[test]
    fn constant_values_widen_range() {
        let h = Histogram::from_values(&[0.25; 10], 4).unwrap();
        assert_eq!(h.range(), (-0.25, 0.75));
        assert_eq!(h.counts.iter().sum::<usize>(), 10);
    }

    #[test]
    fn histogram_rejects_bad_input() {
        assert!(Histogram::from_values(&[], 10).is_err());
        assert!(Histogram::from_values(&[1.0], 0).is_err());
    }
}
