//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - histogram of trial means: `#` bars
//! - CLT Normal overlay: `*` line
//! - interval strip: `[---o---]` per trial, `|` at the true mean

use crate::domain::ConfidenceInterval;
use crate::report::Histogram;

/// Render the density histogram with the Normal overlay on top.
pub fn render_histogram(hist: &Histogram, overlay: &[(f64, f64)], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let (x_min, x_max) = hist.range();

    let peak = hist
        .density
        .iter()
        .copied()
        .chain(overlay.iter().map(|&(_, y)| y))
        .fold(0.0_f64, f64::max);
    let y_max = if peak > 0.0 { peak * 1.05 } else { 1.0 };

    let mut grid = vec![vec![' '; width]; height];

    // Bars first, so the curve overlays them.
    let bins = hist.counts.len();
    for col in 0..width {
        let x = x_min + (col as f64 + 0.5) / width as f64 * (x_max - x_min);
        let bin = (((x - x_min) / hist.bin_width()) as usize).min(bins - 1);
        let d = hist.density[bin];
        if d <= 0.0 {
            continue;
        }
        let top = map_y(d, 0.0, y_max, height);
        for row in grid.iter_mut().skip(top) {
            row[col] = '#';
        }
    }

    draw_curve(&mut grid, overlay, x_min, x_max, y_max, '*');

    let mut out = String::new();
    out.push_str(&format!(
        "Histogram: x=[{x_min:.4}, {x_max:.4}] | density=[0, {y_max:.2}] | '#' trial means, '*' CLT Normal\n"
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

/// Render one row per interval: `[` lower, `]` upper, `o` trial mean, `|` true mean.
///
/// Rows are prefixed with the trial index and `+` (covers) or `x` (misses).
pub fn render_interval_strip(intervals: &[ConfidenceInterval], total: usize, mu: f64, width: usize) -> String {
    let width = width.max(10);

    let mut out = String::new();
    let Some((x_min, x_max)) = interval_range(intervals, mu) else {
        out.push_str("Intervals: none\n");
        return out;
    };
    let (x_min, x_max) = pad_range(x_min, x_max, 0.05);

    out.push_str(&format!(
        "Intervals: first {} of {} | x=[{x_min:.3}, {x_max:.3}] | mu={mu:.4} ('|')\n",
        intervals.len(),
        total
    ));

    let mu_col = map_x(mu, x_min, x_max, width);
    for (i, ci) in intervals.iter().enumerate() {
        let mut row = vec![' '; width];
        let lo = map_x(ci.lower, x_min, x_max, width);
        let hi = map_x(ci.upper, x_min, x_max, width);
        for cell in row.iter_mut().take(hi + 1).skip(lo) {
            *cell = '-';
        }
        row[lo] = '[';
        row[hi] = ']';
        row[mu_col] = '|';
        row[map_x(ci.trial_mean, x_min, x_max, width)] = 'o';

        let marker = if ci.covers_true_mean { '+' } else { 'x' };
        let line: String = row.into_iter().collect();
        out.push_str(format!("{i:>3} {marker} {line}").trim_end());
        out.push('\n');
    }

    out
}

fn interval_range(intervals: &[ConfidenceInterval], mu: f64) -> Option<(f64, f64)> {
    if intervals.is_empty() {
        return None;
    }
    let mut min_x = mu;
    let mut max_x = mu;
    for ci in intervals {
        min_x = min_x.min(ci.lower);
        max_x = max_x.max(ci.upper);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_max: f64, ch: char) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let xx = map_x(x, x_min, x_max, width);
        let yy = map_y(y, 0.0, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, xx, yy, ch);
        } else {
            grid[yy][xx] = ch;
        }
        prev = Some((xx, yy));
    }
}

/// Integer line drawing (Bresenham-ish). Overwrites bars.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
