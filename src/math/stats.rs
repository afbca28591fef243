//! Descriptive statistics over slices of trial means.
//!
//! Sums of up to 10 000 values of similar magnitude are compensated
//! (Neumaier) so the empirical mean is stable to the last few ulps and does
//! not depend on summation order beyond rounding.

/// Compensated sum of `data`.
pub fn compensated_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Arithmetic mean. `None` for empty or non-finite input.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(compensated_sum(data) / data.len() as f64)
}

/// Population variance (denominator `len`), Welford single pass.
pub fn population_variance(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }

    let mut count = 0.0_f64;
    let mut running_mean = 0.0_f64;
    let mut m2 = 0.0_f64;
    for &x in data {
        count += 1.0;
        let delta = x - running_mean;
        running_mean += delta / count;
        m2 += delta * (x - running_mean);
    }
    Some(m2 / count)
}

/// `steps` evenly spaced points between `min` and `max` (inclusive).
///
/// The last point is pinned to `max` exactly.
pub fn linspace(min: f64, max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (steps as f64 - 1.0);
            let mut out: Vec<f64> = (0..steps).map(|i| min + step * i as f64).collect();
            out[steps - 1] = max;
            out
        }
    }
}
