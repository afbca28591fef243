//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initialises logging
//! - runs simulations / sweeps
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use log::{LevelFilter, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::cli::{Cli, Command, PlotArgs, RunArgs, SweepArgs};
use crate::domain::SimulationConfig;
use crate::error::AppError;
use crate::report::{DEFAULT_OVERLAY_POINTS, Histogram};

pub mod pipeline;

/// Entry point for the `clt` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    init_logging(&cli);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Sweep(args) => handle_sweep(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn init_logging(cli: &Cli) {
    let level = match cli.log_level {
        Some(level) => level.to_filter(),
        None => match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        },
    };
    // Only fails if a logger is already installed.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = SimulationConfig::new(args.distribution, args.sample_size, args.trials, args.confidence)?;
    let seed = resolve_seed(args.seed);
    let run = pipeline::run_simulation(&config, seed)?;

    println!("{}", crate::report::format_run_summary(&run));

    if !args.no_plot {
        let plots = render_plots(&run, args.bins, args.preview, args.width, args.height)?;
        println!("{plots}");
    }

    // Optional exports.
    if let Some(path) = &args.export_json {
        crate::io::write_run_json(path, &run)?;
        info!("wrote run JSON to {}", path.display());
    }
    if let Some(path) = &args.export_csv {
        crate::io::write_intervals_csv(path, &run.coverage.intervals)?;
        info!("wrote interval CSV to {}", path.display());
    }

    Ok(())
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let seed = resolve_seed(args.seed);
    let rows = pipeline::run_sweep(args.distribution, &args.sizes, args.trials, args.confidence, seed)?;

    println!("{}", crate::report::format_sweep(&rows, args.distribution, args.trials));
    println!("seed={seed}");
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let doc = crate::io::read_run_json(&args.run)?;
    info!("loaded run generated at {}", doc.generated_at);

    println!("{}", crate::report::format_run_summary(&doc.run));
    println!("{}", render_plots(&doc.run, args.bins, args.preview, args.width, args.height)?);
    Ok(())
}

/// Histogram with Normal overlay, followed by the interval strip.
pub fn render_plots(
    run: &pipeline::RunOutput,
    bins: usize,
    preview: usize,
    width: usize,
    height: usize,
) -> Result<String, AppError> {
    let hist = Histogram::from_values(&run.trials.means, bins)?;
    let (lo, hi) = hist.range();
    let overlay = crate::models::overlay_curve(&run.asymptotic, lo, hi, DEFAULT_OVERLAY_POINTS)?;

    let mut out = crate::plot::render_histogram(&hist, &overlay, width, height);
    out.push('\n');
    out.push_str(&crate::plot::render_interval_strip(
        run.coverage.preview(preview),
        run.coverage.intervals.len(),
        run.asymptotic.mean,
        width,
    ));
    Ok(out)
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let seed = crate::data::fresh_seed();
        info!("no seed given, using {seed}");
        seed
    })
}

/// Rewrite argv so `clt` defaults to `clt run`.
///
/// Rules:
/// - `clt`                      -> `clt run`
/// - `clt -d exp ...`           -> `clt run -d exp ...`
/// - `clt --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "sweep" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
