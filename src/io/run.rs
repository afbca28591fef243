//! Read/write run JSON files.
//!
//! Run JSON is the "portable" representation of a simulation:
//! - validated config + user seed (enough to replay the run; see `data::derive_seed`)
//! - asymptotic parameters, critical value, coverage
//! - every trial mean and interval, so plots can be redrawn without resampling

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::pipeline::RunOutput;
use crate::error::AppError;

/// On-disk schema of an exported run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub run: RunOutput,
}

/// Write a run JSON file.
pub fn write_run_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create run JSON '{}': {e}", path.display())))?;

    let doc = RunFile {
        tool: "clt".to_string(),
        generated_at: Utc::now(),
        run: run.clone(),
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::io(format!("Failed to write run JSON: {e}")))?;

    Ok(())
}

/// Read a run JSON file.
///
/// The config is validated while deserializing; out-of-bounds or mistyped
/// values are reported as invalid configuration, unreadable files as I/O.
pub fn read_run_json(path: &Path) -> Result<RunFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open run JSON '{}': {e}", path.display())))?;
    let doc: RunFile = serde_json::from_reader(file).map_err(|e| {
        if e.is_data() {
            AppError::invalid_config(format!("Invalid run JSON: {e}"))
        } else {
            AppError::io(format!("Failed to parse run JSON: {e}"))
        }
    })?;

    let c = &doc.run.config;
    if doc.run.trials.means.len() != c.trial_count() || doc.run.coverage.intervals.len() != c.trial_count() {
        return Err(AppError::invalid_config(format!(
            "Run JSON holds {} means and {} intervals for N={}.",
            doc.run.trials.means.len(),
            doc.run.coverage.intervals.len(),
            c.trial_count()
        )));
    }

    Ok(doc)
}
