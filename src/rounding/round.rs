//! rounding::round — half-away rounding and sum-preserving distribution.
//!
//! Purpose
//! -------
//! Round values to a fixed number of decimals with ties going away from
//! zero, and distribute the residual of a rounded window so the rounded
//! values sum exactly to the rounded target.
//!
//! Key behaviors
//! -------------
//! - [`round_half_away`] scales, truncates toward zero, and normalizes the
//!   fractional part through a fixed 6-decimal text round trip before the
//!   half test, so values sitting a hair under .5 from accumulated binary
//!   error still round the way their decimal rendering reads.
//! - [`round_to_sum`] rounds every value independently, ranks the signed
//!   rounding deviations in descending order, and moves one last-digit
//!   unit at a time onto the values whose deviation best absorbs it until
//!   the window total matches the rounded target.
//!
//! Invariants & assumptions
//! ------------------------
//! - Adjusted outputs differ from their independently rounded value by at
//!   most one unit in the last kept digit.
//! - Ranking ties are broken by original position, so equal deviations
//!   are adjusted in index order and results are deterministic.
use std::cmp::Ordering;

use crate::rounding::errors::{RoundingError, RoundingResult};

/// Largest rounding window accepted by default.
pub const DEFAULT_CAPACITY: usize = 300;

/// Round `value` to `decimals` places, ties away from zero.
///
/// The fractional distance to the truncation point is rendered with six
/// decimals and re-parsed before comparing against one half, normalizing
/// binary representation error the way the decimal rendering of the value
/// reads.
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    let lshift = 10f64.powi(decimals as i32);
    let rshift = 10f64.powi(-(decimals as i32));

    let scaled = value * lshift;
    let mut truncated = scaled.floor();
    if scaled < 0.0 {
        truncated += 1.0;
    }

    let fraction = (scaled - truncated).abs();
    let fraction = format!("{fraction:.6}").parse::<f64>().unwrap_or(fraction);

    if fraction >= 0.5 {
        if scaled < 0.0 {
            truncated -= 1.0;
        } else {
            truncated += 1.0;
        }
    }

    truncated * rshift
}

/// Round a window of values so they sum exactly to the rounded target.
///
/// Parameters
/// ----------
/// - `values`: `&[f64]`
///   Window to round.
/// - `sum`: `f64`
///   Target the rounded window must total; rounded to `decimals` first
///   and not required to be pre-rounded.
/// - `decimals`: `u32`
///   Number of decimal places kept.
/// - `capacity`: `usize`
///   Largest admissible window, [`DEFAULT_CAPACITY`] for the legacy
///   bound.
///
/// Returns
/// -------
/// `RoundingResult<Vec<f64>>`
///   The rounded window, summing to the rounded target.
///
/// Errors
/// ------
/// - `RoundingError::CapacityExceeded` when the window is larger than
///   `capacity`.
/// - `RoundingError::IrreparableDiscrepancy` when more unit adjustments
///   would be needed than the window has values.
pub fn round_to_sum(
    values: &[f64],
    sum: f64,
    decimals: u32,
    capacity: usize,
) -> RoundingResult<Vec<f64>> {
    let n = values.len();
    if n > capacity {
        return Err(RoundingError::CapacityExceeded { len: n, capacity });
    }

    let lshift = 10f64.powi(decimals as i32);
    let unit = 10f64.powi(-(decimals as i32));

    let target = round_half_away(sum, decimals);
    let mut out: Vec<f64> = values.iter().map(|&v| round_half_away(v, decimals)).collect();

    let mut total = 0.0;
    let mut deviation = Vec::with_capacity(n);
    for (rounded, &original) in out.iter().zip(values) {
        total += rounded;
        deviation.push(rounded - original);
    }

    let residual = target - total;
    if residual.abs() < 0.5 * unit {
        return Ok(out);
    }

    let needed = (residual.abs() + 0.5 * unit) * lshift;
    if needed > n as f64 + 1.0 {
        return Err(RoundingError::IrreparableDiscrepancy { needed, window: n });
    }
    let count = needed as usize;
    if count > n {
        return Err(RoundingError::IrreparableDiscrepancy { needed, window: n });
    }

    // Rank deviations in descending order; ties keep index order.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        deviation[b].partial_cmp(&deviation[a]).unwrap_or(Ordering::Equal)
    });

    if residual > 0.0 {
        // Short rounded total: raise the values rounded down the furthest.
        for &index in order.iter().rev().take(count) {
            out[index] += unit;
        }
    } else {
        // Excess rounded total: lower the values rounded up the furthest.
        for &index in order.iter().take(count) {
            out[index] -= unit;
        }
    }

    Ok(out)
}
