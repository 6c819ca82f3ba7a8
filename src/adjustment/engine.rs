//! adjustment::engine — constrained quadratic-minimization benchmarking.
//!
//! Purpose
//! -------
//! Adjust a high-frequency distributor series so that it satisfies
//! benchmark aggregates exactly while disturbing the series' period-to-
//! period movement as little as possible. The movement penalty is the
//! near-unit-root autocorrelation kernel of [`crate::adjustment::kernel`];
//! the constrained minimum is obtained in closed form through the
//! aggregated Gram matrix.
//!
//! Key behaviors
//! -------------
//! - Validate every input before touching the numerics: series lengths,
//!   interval bounds, and weight positivity.
//! - Solve `cor = K' W (W' K' W)^-1 d` with `K'` the kernel-times-
//!   aggregation matrix and `d` the weighted discrepancies, then apply the
//!   correction additively.
//! - In proportional mode, report the correction as the multiplicative
//!   factor `adjusted / distributor` after applying it.
//! - With the second-difference penalty, extrapolate the correction past
//!   the last constrained index with a constant last difference instead of
//!   letting the kernel taper it.
//!
//! Invariants & assumptions
//! ------------------------
//! - For every benchmark `m`, the weighted sum of the adjusted series over
//!   interval `m` equals the benchmark to floating-point accuracy; a link
//!   interval participates like any other constraint.
//! - The engine is pure: no I/O, no global state, and deterministic output
//!   for identical inputs, so concurrent calls need no synchronization.
//!
//! Testing notes
//! -------------
//! - Engine tests pin the constraint invariant, both modes, the tail
//!   extrapolation, and each validation failure. Integration coverage
//!   lives in `tests/integration_reconcile_pipeline.rs`.
use crate::adjustment::errors::{AdjustmentError, AdjustmentResult};
use crate::adjustment::kernel::{build_qinvw, build_wqinvw, weighted_discrepancies};
use crate::adjustment::solver::invert_in_place;
use crate::reference::ReferenceIntervals;

/// How corrections combine with the distributor.
///
/// Additive spreads the level discrepancy; proportional preserves the
/// distributor's relative movement by scaling the kernel with the series
/// itself, suitable for strictly positive series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentMode {
    Additive,
    Proportional,
}

/// Order of the movement penalty.
///
/// Both orders share the same kernel solve; the second-difference variant
/// additionally extrapolates the correction past the last constrained
/// index with a constant last difference, keeping the trailing trend
/// instead of tapering back towards zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyOrder {
    FirstDifference,
    SecondDifference,
}

/// Options of a single engine run.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentOptions {
    /// Additive or proportional correction.
    pub mode: AdjustmentMode,
    /// Movement-penalty order.
    pub penalty: PenaltyOrder,
    /// Benchmarks are per-period index levels rather than interval totals.
    pub index_series: bool,
    /// Optional per-observation weights; unit weights when `None`.
    pub weights: Option<Vec<f64>>,
}

impl Default for AdjustmentOptions {
    fn default() -> AdjustmentOptions {
        AdjustmentOptions {
            mode: AdjustmentMode::Additive,
            penalty: PenaltyOrder::SecondDifference,
            index_series: false,
            weights: None,
        }
    }
}

/// Output of one engine run.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentOutcome {
    /// Adjusted series, same length and index space as the distributor.
    pub adjusted: Vec<f64>,
    /// Per-observation correction: additive offsets in additive mode,
    /// multiplicative factors in proportional mode.
    pub correction: Vec<f64>,
}

/// Benchmark a distributor series against aggregate constraints.
///
/// Parameters
/// ----------
/// - `distributor`: `&[f64]`
///   High-frequency series to adjust, length `tt`.
/// - `benchmarks`: `&[f64]`
///   One constraint value per reference interval, link point included.
/// - `intervals`: `&`[`ReferenceIntervals`]
///   1-based inclusive intervals over the distributor, one per benchmark.
/// - `options`: `&`[`AdjustmentOptions`]
///   Mode, penalty order, index flag, and optional weights.
///
/// Returns
/// -------
/// `AdjustmentResult<AdjustmentOutcome>`
///   The adjusted series and its correction, or a validation error.
///
/// Errors
/// ------
/// - `AdjustmentError::EmptyDistributor`, `NoBenchmarks`,
///   `LengthMismatch`, `WeightLengthMismatch`, `NonPositiveWeight`,
///   `IntervalOutOfRange`, `EmptyInterval` on invalid input;
///   `ResourceExhausted` when a working matrix cannot be allocated.
pub fn benchmark_series(
    distributor: &[f64],
    benchmarks: &[f64],
    intervals: &ReferenceIntervals,
    options: &AdjustmentOptions,
) -> AdjustmentResult<AdjustmentOutcome> {
    let tt = distributor.len();
    let mm = intervals.len();

    if tt == 0 {
        return Err(AdjustmentError::EmptyDistributor);
    }
    if mm == 0 {
        return Err(AdjustmentError::NoBenchmarks);
    }
    if benchmarks.len() != mm {
        return Err(AdjustmentError::LengthMismatch { benchmarks: benchmarks.len(), intervals: mm });
    }

    for m in 0..mm {
        let (tau, kappa) = intervals.window(m);
        if kappa < tau {
            return Err(AdjustmentError::EmptyInterval { interval: m, tau, kappa });
        }
        if tau < 1 || kappa > tt as i64 {
            return Err(AdjustmentError::IntervalOutOfRange { interval: m, tau, kappa, points: tt });
        }
    }

    let unit_weights;
    let weights: &[f64] = match &options.weights {
        Some(w) => {
            if w.len() != tt {
                return Err(AdjustmentError::WeightLengthMismatch { weights: w.len(), points: tt });
            }
            if let Some((index, &weight)) = w.iter().enumerate().find(|(_, &v)| v <= 0.0) {
                return Err(AdjustmentError::NonPositiveWeight { index, weight });
            }
            w
        }
        None => {
            unit_weights = vec![1.0; tt];
            &unit_weights
        }
    };

    let proportional = options.mode == AdjustmentMode::Proportional;

    let qinvw = build_qinvw(distributor, intervals, weights, proportional)?;
    let mut gram = build_wqinvw(&qinvw, intervals, weights)?;
    let disc = weighted_discrepancies(distributor, benchmarks, intervals, weights, options.index_series);

    invert_in_place(&mut gram);
    let multipliers = gram.dot(&disc);
    let correction = qinvw.dot(&multipliers);

    let mut adjusted = Vec::with_capacity(tt);
    let mut correction = correction.to_vec();
    for t in 0..tt {
        adjusted.push(distributor[t] + correction[t]);
        if proportional {
            correction[t] = adjusted[t] / distributor[t];
        }
    }

    if options.penalty == PenaltyOrder::SecondDifference {
        extrapolate_tail(distributor, &mut adjusted, &mut correction, intervals, proportional);
    }

    Ok(AdjustmentOutcome { adjusted, correction })
}

/// Constant-difference extrapolation of the correction past the last
/// constrained index, the trailing behavior of the second-difference
/// penalty.
fn extrapolate_tail(
    distributor: &[f64],
    adjusted: &mut [f64],
    correction: &mut [f64],
    intervals: &ReferenceIntervals,
    proportional: bool,
) {
    let tt = distributor.len();
    let (_, last_kappa) = intervals.window(intervals.len() - 1);
    let t2 = last_kappa as usize;

    // With a single constrained point there is no last difference to carry.
    if t2 >= tt || t2 < 2 {
        return;
    }

    let last_dif = correction[t2 - 1] - correction[t2 - 2];
    for t in t2..tt {
        correction[t] = correction[t - 1] + last_dif;
        adjusted[t] = if proportional {
            distributor[t] * correction[t]
        } else {
            distributor[t] + correction[t]
        };
    }
}
