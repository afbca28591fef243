//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the simulation code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::{RunOutput, SweepRow};
use crate::domain::{CoverageStatus, DistributionSpec};

/// Format the full run summary: empirical vs theoretical moments and coverage.
pub fn format_run_summary(run: &RunOutput) -> String {
    let config = &run.config;
    let mut out = String::new();

    out.push_str("=== clt - Central Limit Theorem simulation ===\n");
    out.push_str(&format!("Distribution: {}\n", config.distribution().display_name()));
    out.push_str(&format!(
        "Sample size n={} | trials N={} | seed={}\n",
        config.sample_size(),
        config.trial_count(),
        run.seed
    ));

    out.push_str("\nSample means:\n");
    out.push_str(&format!(
        "  {:<14} {:>12} {:>12}\n",
        "", "empirical", "theory (CLT)"
    ));
    out.push_str(&format!(
        "  {:<14} {:>12.4} {:>12.4}\n",
        "mean", run.summary.mean, run.asymptotic.mean
    ));
    out.push_str(&format!(
        "  {:<14} {:>12.6} {:>12.6}\n",
        "variance", run.summary.variance, run.asymptotic.variance
    ));
    out.push_str(&format!("Standard error: {:.4}\n", run.coverage.standard_error));

    let result = &run.coverage.result;
    out.push_str(&format!(
        "\nCoverage ({:.0}% intervals, z={:.5}):\n",
        result.confidence_level * 100.0,
        run.coverage.z
    ));
    out.push_str(&format!("  expected : {:.0}%\n", result.confidence_level * 100.0));
    out.push_str(&format!(
        "  empirical: {:.2}% ({}/{})\n",
        result.empirical_coverage * 100.0,
        result.covered,
        result.trials
    ));
    out.push_str(&format!(
        "  {}\n",
        advisory_line(result.status, result.empirical_coverage, config.advisory_threshold())
    ));

    out
}

/// Format a sample-size sweep as a table.
pub fn format_sweep(rows: &[SweepRow], distribution: DistributionSpec, trials: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== clt sweep - {} | N={} ===\n",
        distribution.display_name(),
        trials
    ));
    out.push_str(&format!(
        "{:>5} {:>14} {:>14} {:>10} {:<8}\n",
        "n", "var (theory)", "var (emp.)", "coverage", "status"
    ));
    out.push_str(&format!(
        "{:->5} {:->14} {:->14} {:->10} {:-<8}\n",
        "", "", "", "", ""
    ));
    for row in rows {
        out.push_str(&format!(
            "{:>5} {:>14.6} {:>14.6} {:>9.2}% {:<8}\n",
            row.sample_size,
            row.theoretical_variance,
            row.empirical_variance,
            row.coverage.empirical_coverage * 100.0,
            status_label(row.coverage.status)
        ));
    }
    out
}

fn advisory_line(status: CoverageStatus, coverage: f64, threshold: f64) -> String {
    match status {
        CoverageStatus::Nominal => {
            "OK: empirical coverage is close to nominal; the Normal approximation holds.".to_string()
        }
        CoverageStatus::Degraded => format!(
            "WARNING: coverage is low ({:.2}% < {:.0}%). Expected for small n with a non-Normal base; increase n.",
            coverage * 100.0,
            threshold * 100.0
        ),
    }
}

fn status_label(status: CoverageStatus) -> &'static str {
    match status {
        CoverageStatus::Nominal => "ok",
        CoverageStatus::Degraded => "low",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CoverageResult;

    #[test]
    fn sweep_table_lists_every_row() {
        let row = |n: usize, cov: f64, status| SweepRow {
            sample_size: n,
            theoretical_variance: 0.25 / n as f64,
            empirical_variance: 0.25 / n as f64,
            coverage: CoverageResult {
                empirical_coverage: cov,
                covered: (cov * 1000.0) as usize,
                trials: 1000,
                confidence_level: 0.95,
                status,
            },
        };
        let txt = format_sweep(
            &[row(4, 0.875, CoverageStatus::Degraded), row(100, 0.943, CoverageStatus::Nominal)],
            DistributionSpec::Bernoulli,
            1000,
        );

        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Bernoulli(p=0.5)"));
        assert!(lines[3].contains("87.50%") && lines[3].trim_end().ends_with("low"));
        assert!(lines[4].contains("94.30%") && lines[4].trim_end().ends_with("ok"));
    }

    #[test]
    fn advisory_mentions_low_coverage() {
        let line = advisory_line(CoverageStatus::Degraded, 0.9, 0.93);
        assert!(line.contains("90.00% < 93%"), "{line}");
        assert!(advisory_line(CoverageStatus::Nominal, 0.95, 0.93).starts_with("OK"));
    }
}
