use chrono::Datelike;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{OhlcRecord, VisibleRange};

const MAX_TICKS: usize = 64;

/// Round-number ticks (1/2/5 x 10^k steps) inside `[min, max]`.
#[must_use]
pub fn nice_ticks(min: f64, max: f64, target_count: usize) -> SmallVec<[f64; 12]> {
    let mut out = SmallVec::new();
    if target_count == 0 || !min.is_finite() || !max.is_finite() {
        return out;
    }
    let span = max - min;
    if span <= 0.0 {
        out.push(min);
        return out;
    }

    let step = nice_step(span, target_count);
    let mut value = (min / step).ceil() * step;
    while value <= max + step * 1e-9 && out.len() < MAX_TICKS {
        // Re-derive from the step count so ticks do not accumulate error.
        let snapped = (value / step).round() * step;
        out.push(if snapped == 0.0 { 0.0 } else { snapped });
        value += step;
    }
    out
}

/// Step size from the 1/2/5 family closest above `span / target_count`.
#[must_use]
pub fn nice_step(span: f64, target_count: usize) -> f64 {
    let raw = span / target_count.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Decimal places needed to print values on a grid of `step`.
#[must_use]
pub fn decimals_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10()).ceil().clamp(0.0, 8.0) as usize
}

#[must_use]
pub fn format_price(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Compact volume label (`1.25K`, `3.40M`, `1.02B`).
#[must_use]
pub fn format_volume(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{value:.0}")
    }
}

/// Time axis tick anchored to a data index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTick {
    pub index: usize,
    pub label: String,
}

/// Picks time axis ticks for the visible window.
///
/// Calendar month boundaries win; when the window is too narrow to contain
/// a boundary, ticks fall back to a fixed index cadence so labels stay put
/// while scrolling. Consecutive ticks are at least `min_spacing` logical
/// pixels apart.
#[must_use]
pub fn time_ticks(
    data: &[OhlcRecord],
    range: VisibleRange,
    unit: f64,
    min_spacing: f64,
) -> Vec<TimeTick> {
    let end = range.end.min(data.len());
    if range.start >= end || !unit.is_finite() || unit <= 0.0 {
        return Vec::new();
    }
    let min_columns = (min_spacing / unit).ceil().max(1.0) as usize;

    let mut ticks: Vec<TimeTick> = Vec::new();
    let mut last_kept: Option<usize> = None;
    for index in range.start.max(1)..end {
        let (Some(previous), Some(current)) = (data[index - 1].datetime(), data[index].datetime())
        else {
            continue;
        };
        let month_changed =
            previous.year() != current.year() || previous.month() != current.month();
        if !month_changed {
            continue;
        }
        if last_kept.is_some_and(|kept| index - kept < min_columns) {
            continue;
        }
        ticks.push(TimeTick {
            index,
            label: current.format("%Y-%m").to_string(),
        });
        last_kept = Some(index);
    }

    if !ticks.is_empty() {
        return ticks;
    }

    let first = range.start.div_ceil(min_columns) * min_columns;
    (first..end)
        .step_by(min_columns)
        .filter_map(|index| {
            data[index].datetime().map(|time| TimeTick {
                index,
                label: time.format("%m-%d").to_string(),
            })
        })
        .collect()
}
