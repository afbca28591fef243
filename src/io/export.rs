//! Export per-trial intervals to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::ConfidenceInterval;
use crate::error::AppError;

/// Write `trial,mean,lower,upper,covers` rows for every interval.
pub fn write_intervals_csv(path: &Path, intervals: &[ConfidenceInterval]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "trial,mean,lower,upper,covers")
        .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    for (i, ci) in intervals.iter().enumerate() {
        writeln!(
            out,
            "{},{:.10},{:.10},{:.10},{}",
            i, ci.trial_mean, ci.lower, ci.upper, ci.covers_true_mean
        )
        .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::io(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_header_and_one_row_per_interval() {
        let intervals = [
            ConfidenceInterval {
                trial_mean: 0.5,
                lower: 0.25,
                upper: 0.75,
                covers_true_mean: true,
            },
            ConfidenceInterval {
                trial_mean: 0.9,
                lower: 0.65,
                upper: 1.15,
                covers_true_mean: false,
            },
        ];
        let path = std::env::temp_dir().join(format!("clt-{}-intervals.csv", std::process::id()));

        write_intervals_csv(&path, &intervals).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "trial,mean,lower,upper,covers");
        assert_eq!(lines[1], "0,0.5000000000,0.2500000000,0.7500000000,true");
        assert_eq!(lines[2], "1,0.9000000000,0.6500000000,1.1500000000,false");
    }
}
