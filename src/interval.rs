//! Win-interval math for payout tables.
//!
//! Maps win percentages onto sub-ranges of the roll output space. Single
//! intervals are anchored at the top of the range (`end == total_range`);
//! multiple intervals tile the range contiguously from 1 in the order the
//! percentages were supplied.

use crate::errors::{FairnessError, Result};
use crate::roll::DEFAULT_RANGE;
use serde::{Deserialize, Serialize};

/// A contiguous win band inside `[1, total_range]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WinInterval {
    pub percentage: f64,
    pub start: u32,
    pub end: u32,
}

fn interval_size(percentage: f64, total_range: u32) -> Result<u32> {
    if total_range == 0 {
        return Err(FairnessError::InvalidArgument(
            "total range must be >= 1".to_string(),
        ));
    }
    if !(percentage > 0.0 && percentage <= 100.0) {
        return Err(FairnessError::InvalidArgument(format!(
            "percentage must be in (0, 100], got {}",
            percentage
        )));
    }

    let size = ((percentage / 100.0) * f64::from(total_range)).round() as u32;
    if size == 0 {
        return Err(FairnessError::InvalidArgument(format!(
            "percentage {} rounds to an empty interval over {} outcomes",
            percentage, total_range
        )));
    }
    Ok(size)
}

/// Win interval for a single percentage, anchored at the top of the range:
/// `end == total_range`, `start = total_range - size + 1`.
pub fn win_interval(percentage: f64, total_range: u32) -> Result<WinInterval> {
    let size = interval_size(percentage, total_range)?;
    Ok(WinInterval {
        percentage,
        start: total_range - size + 1,
        end: total_range,
    })
}

/// Win intervals for several percentages, laid out contiguously from 1.
///
/// Each size is rounded independently, so when the percentages do not sum
/// to exactly 100 the tiling may fall short of or spill past `total_range`
/// by a few outcomes. That drift is accepted, not an error.
pub fn win_intervals(percentages: &[f64], total_range: u32) -> Result<Vec<WinInterval>> {
    let mut intervals = Vec::with_capacity(percentages.len());
    let mut current_start: u64 = 1;

    for &percentage in percentages {
        let size = u64::from(interval_size(percentage, total_range)?);
        let end = current_start + size - 1;
        if end > u64::from(u32::MAX) {
            return Err(FairnessError::InvalidArgument(
                "percentages overflow the representable range".to_string(),
            ));
        }
        intervals.push(WinInterval {
            percentage,
            start: current_start as u32,
            end: end as u32,
        });
        current_start = end + 1;
    }

    Ok(intervals)
}

/// Win probability (percent) of a `win_range`-sized band inside
/// `[1, total_range]`.
pub fn win_probability(win_range: u32, total_range: u32) -> Result<f64> {
    if win_range < 1 || win_range > total_range {
        return Err(FairnessError::InvalidArgument(format!(
            "win range must be between 1 and {}, got {}",
            total_range, win_range
        )));
    }
    Ok(f64::from(win_range) / f64::from(total_range) * 100.0)
}

/// [`win_interval`] over the default roll range.
pub fn win_interval_default(percentage: f64) -> Result<WinInterval> {
    win_interval(percentage, DEFAULT_RANGE)
}

/// [`win_probability`] over the default roll range.
pub fn win_probability_default(win_range: u32) -> Result<f64> {
    win_probability(win_range, DEFAULT_RANGE)
}
