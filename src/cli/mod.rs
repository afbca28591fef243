//! Command-line parsing for the CLT simulator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the simulation/math code.
//!
//! Every run flag can also come from the environment (`CLT_*`), which in turn
//! may be populated from a `.env` file.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::domain::{DEFAULT_CONFIDENCE_LEVEL, DistributionSpec};
use crate::report::{DEFAULT_HISTOGRAM_BINS, DEFAULT_INTERVAL_PREVIEW};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "clt", version, about = "Central Limit Theorem sampling and coverage simulator")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Explicit log level (overrides -v).
    #[arg(long, global = true, value_enum, env = "CLT_LOG")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate N trials of size n, print moments and coverage, and optionally plot/export.
    Run(RunArgs),
    /// Compare coverage across several sample sizes.
    Sweep(SweepArgs),
    /// Re-render a previously exported run JSON without resampling.
    Plot(PlotArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Options for a single simulation run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Base distribution (uniform, exponential, bernoulli).
    #[arg(short = 'd', long = "dist", value_enum, env = "CLT_DIST", default_value_t = DistributionSpec::Uniform)]
    pub distribution: DistributionSpec,

    /// Draws per trial (1..=100).
    #[arg(short = 'n', long, env = "CLT_SAMPLE_SIZE", default_value_t = 30)]
    pub sample_size: usize,

    /// Number of trials (100..=10000).
    #[arg(short = 'N', long, env = "CLT_TRIALS", default_value_t = 2000)]
    pub trials: usize,

    /// Nominal confidence level of the per-trial intervals.
    #[arg(long, env = "CLT_CONFIDENCE", default_value_t = DEFAULT_CONFIDENCE_LEVEL)]
    pub confidence: f64,

    /// Random seed; a fresh one is drawn (and printed) when omitted.
    #[arg(long, env = "CLT_SEED")]
    pub seed: Option<u64>,

    /// Histogram bins.
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
    pub bins: usize,

    /// Number of intervals shown in the interval strip.
    #[arg(long, default_value_t = DEFAULT_INTERVAL_PREVIEW)]
    pub preview: usize,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Histogram height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the full run (config, seed, means, intervals) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Export per-trial intervals to CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,
}

/// Options for a sample-size sweep.
#[derive(Debug, Parser, Clone)]
pub struct SweepArgs {
    /// Base distribution (uniform, exponential, bernoulli).
    #[arg(short = 'd', long = "dist", value_enum, env = "CLT_DIST", default_value_t = DistributionSpec::Bernoulli)]
    pub distribution: DistributionSpec,

    /// Number of trials per sample size.
    #[arg(short = 'N', long, env = "CLT_TRIALS", default_value_t = 5000)]
    pub trials: usize,

    /// Comma-separated sample sizes.
    #[arg(long, value_delimiter = ',', default_value = "1,2,4,5,10,30,100")]
    pub sizes: Vec<usize>,

    /// Nominal confidence level of the per-trial intervals.
    #[arg(long, env = "CLT_CONFIDENCE", default_value_t = DEFAULT_CONFIDENCE_LEVEL)]
    pub confidence: f64,

    /// Random seed; a fresh one is drawn (and printed) when omitted.
    #[arg(long, env = "CLT_SEED")]
    pub seed: Option<u64>,
}

/// Options for plotting a saved run.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Run JSON file produced by `clt run --export-json`.
    #[arg(long, value_name = "JSON")]
    pub run: PathBuf,

    /// Histogram bins.
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
    pub bins: usize,

    /// Number of intervals shown in the interval strip.
    #[arg(long, default_value_t = DEFAULT_INTERVAL_PREVIEW)]
    pub preview: usize,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Histogram height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults_match_classroom_setup() {
        let cli = Cli::try_parse_from(["clt", "run"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.sample_size, 30);
        assert_eq!(args.trials, 2000);
        assert_eq!(args.confidence, 0.95);
        assert_eq!(args.bins, 40);
        assert_eq!(args.preview, 50);
    }

    #[test]
    fn parses_short_flags_and_aliases() {
        let cli = Cli::try_parse_from(["clt", "run", "-d", "exp", "-n", "5", "-N", "300", "--seed", "7", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.distribution, DistributionSpec::Exponential);
        assert_eq!(args.sample_size, 5);
        assert_eq!(args.trials, 300);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn sweep_sizes_are_comma_separated() {
        let cli = Cli::try_parse_from(["clt", "sweep", "--sizes", "1,10,100"]).unwrap();
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep command");
        };
        assert_eq!(args.sizes, vec![1, 10, 100]);
    }

    #[test]
    fn sweep_default_sizes_include_the_small_n_dip() {
        let cli = Cli::try_parse_from(["clt", "sweep"]).unwrap();
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep command");
        };
        assert_eq!(args.sizes, vec![1, 2, 4, 5, 10, 30, 100]);
        assert_eq!(args.distribution, DistributionSpec::Bernoulli);
    }

    #[test]
    fn unknown_distribution_is_rejected() {
        assert!(Cli::try_parse_from(["clt", "run", "-d", "poisson"]).is_err());
    }
}
