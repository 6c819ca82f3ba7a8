//! reconcile::request — the end-to-end reconciliation orchestrator.
//!
//! Purpose
//! -------
//! Drive one reconciliation request through every stage: span and series
//! validation, benchmark-window derivation, reference-interval
//! construction, the quadratic-minimization engine, optional controlled
//! rounding, the zero override, and the closing diagnostics sweep.
//!
//! Key behaviors
//! -------------
//! - Trim missing values from the tail of the benchmark input, shrinking
//!   the covered window and reporting the trim as a diagnostic instead of
//!   failing the request.
//! - Merge a stock link point that collides with the first benchmark into
//!   a single constraint.
//! - Apply the zero override after rounding, so forced zeros are exact in
//!   the delivered precision.
//! - Collect non-fatal observations (discontinuities, sign problems,
//!   single-benchmark runs) on the outcome.
//!
//! Invariants & assumptions
//! ------------------------
//! - The outcome's `adjusted` and `correction` share the distributor's
//!   length and index space.
//! - The orchestrator holds no state between requests; concurrent calls
//!   are independent.
//!
//! Testing notes
//! -------------
//! - Module tests cover validation and diagnostics; the full pipeline is
//!   exercised in `tests/integration_reconcile_pipeline.rs`.
use crate::adjustment::{benchmark_series, AdjustmentOptions};
use crate::calendar::{benchmark_window, count_points, Frequency, FrequencySpec, Period, PeriodRange};
use crate::reconcile::config::AlgorithmConfig;
use crate::reconcile::diagnostics::Diagnostic;
use crate::reconcile::errors::{ReconcileError, ReconcileResult};
use crate::reference::ReferenceIntervals;
use crate::rounding::round_series_to_benchmarks;

/// Result of a reconciliation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    /// Adjusted series, same length and index space as the distributor.
    pub adjusted: Vec<f64>,
    /// Per-observation correction as reported by the engine: offsets in
    /// additive mode, factors in proportional mode, before rounding.
    pub correction: Vec<f64>,
    /// Non-fatal observations, in the order the stages produced them.
    pub diagnostics: Vec<Diagnostic>,
}

/// Reconcile a distributor series with its benchmarks.
///
/// Parameters
/// ----------
/// - `distributor`: `&[f64]`
///   High-frequency series covering `span`, one value per period.
/// - `benchmarks`: `&[f64]`
///   One value per covered benchmark period, preceded by the link value
///   when `config.linked`. Missing tail values may be NaN.
/// - `spec`: `&`[`FrequencySpec`]
///   Frequency pairing and fiscal lag of the request.
/// - `span`: [`PeriodRange`]
///   Distributor span, on the distributor calendar.
/// - `config`: `&`[`AlgorithmConfig`]
///   Algorithm configuration.
///
/// Returns
/// -------
/// `ReconcileResult<ReconcileOutcome>`
///   The adjusted series, its correction, and any diagnostics.
///
/// Errors
/// ------
/// - `ReconcileError::InvalidSpan`, `DistributorLengthMismatch`,
///   `BenchmarkLengthMismatch`, `MissingLinkPoint`, `MissingUpdatePoint`,
///   `NoBenchmarkSpan` on request-level validation failures, plus any
///   wrapped stage error.
pub fn reconcile(
    distributor: &[f64],
    benchmarks: &[f64],
    spec: &FrequencySpec,
    span: PeriodRange,
    config: &AlgorithmConfig,
) -> ReconcileResult<ReconcileOutcome> {
    if span.to < span.from {
        return Err(ReconcileError::InvalidSpan { from: span.from.code(), to: span.to.code() });
    }
    let nbdist = count_points(span.from, span.to, spec.freq, spec.freq);
    if nbdist != distributor.len() as i64 {
        return Err(ReconcileError::DistributorLengthMismatch {
            expected: nbdist,
            actual: distributor.len(),
        });
    }

    let link_to = match (config.linked, config.link_to) {
        (true, None) => return Err(ReconcileError::MissingLinkPoint),
        (true, Some(link)) => Some(link),
        (false, _) => None,
    };
    if config.update && config.update_from.is_none() {
        return Err(ReconcileError::MissingUpdatePoint);
    }

    let mut window = benchmark_window(span, spec, config.stock);
    let mut nbpoints = count_points(window.from, window.to, spec.bench_freq, spec.bench_freq);
    if nbpoints <= 0 {
        return Err(ReconcileError::NoBenchmarkSpan);
    }

    let expected = nbpoints + i64::from(config.linked);
    if benchmarks.len() as i64 != expected {
        return Err(ReconcileError::BenchmarkLengthMismatch {
            expected,
            actual: benchmarks.len(),
        });
    }

    let mut diagnostics = Vec::new();

    // Missing benchmark values at the tail shrink the covered window.
    let mut benchmarks = benchmarks.to_vec();
    let mut trimmed = 0usize;
    while benchmarks.len() > usize::from(config.linked)
        && benchmarks.last().is_some_and(|value| value.is_nan())
    {
        benchmarks.pop();
        trimmed += 1;
    }
    if trimmed > 0 {
        nbpoints -= trimmed as i64;
        if nbpoints <= 0 {
            return Err(ReconcileError::NoBenchmarkSpan);
        }
        window.to = window.to.offset(spec.bench_freq, -(trimmed as i64));
        diagnostics.push(Diagnostic::TrailingBenchmarkMissing { trimmed });
    }
    if nbpoints == 1 {
        diagnostics.push(Diagnostic::SingleBenchmark);
    }

    // Effective resume point: never earlier than just past the link.
    let update_from = match (config.update_from, link_to) {
        (Some(update), Some(link)) if update <= link => Some(link.offset(spec.freq, 1)),
        (update, _) => update,
    };

    let mut intervals = ReferenceIntervals::build(span, window, spec, link_to, config.stock);

    // A stock link point landing on the first benchmark's index leaves two
    // constraints on one observation; keep the link and drop the benchmark.
    if config.stock && intervals.len() >= 2 && intervals.tau()[0] == intervals.tau()[1] {
        intervals.remove(1);
        benchmarks.remove(1);
        diagnostics.push(Diagnostic::LinkPointCollision);
    }

    let options = AdjustmentOptions {
        mode: config.mode,
        penalty: config.penalty,
        index_series: config.index_series,
        weights: config.weights.clone(),
    };
    let outcome = benchmark_series(distributor, &benchmarks, &intervals, &options)?;
    let mut adjusted = outcome.adjusted;

    if let Some(decimals) = config.rounding {
        round_series_to_benchmarks(
            &mut adjusted,
            &benchmarks,
            &intervals,
            config.linked,
            decimals,
            config.rounding_capacity,
        )?;
    }

    if config.zero_override {
        for m in 0..intervals.len() {
            if benchmarks[m] == 0.0 {
                let (tau, kappa) = intervals.window(m);
                for value in &mut adjusted[(tau - 1) as usize..kappa as usize] {
                    *value = 0.0;
                }
            }
        }
    }

    closing_diagnostics(
        distributor,
        &adjusted,
        spec,
        window.from,
        link_to,
        update_from,
        config,
        &mut diagnostics,
    );

    Ok(ReconcileOutcome { adjusted, correction: outcome.correction, diagnostics })
}

/// Post-run sweep for discontinuities and sign problems.
#[allow(clippy::too_many_arguments)]
fn closing_diagnostics(
    distributor: &[f64],
    adjusted: &[f64],
    spec: &FrequencySpec,
    window_from: Period,
    link_to: Option<Period>,
    update_from: Option<Period>,
    config: &AlgorithmConfig,
    diagnostics: &mut Vec<Diagnostic>,
) {
    // First distributor period the covered benchmarks constrain, on the
    // distributor calendar.
    let period = match spec.bench_freq {
        Frequency::Annual => 1,
        _ => window_from.period * 3 - 2,
    };
    let anchor = Period { year: window_from.year, period }.offset(spec.freq, spec.fiscal_lag);
    let update_optimal = anchor;
    let link_optimal = anchor.offset(spec.freq, -1);

    if let Some(link) = link_to {
        if link_optimal != link {
            diagnostics.push(Diagnostic::LinkDiscontinuity { expected: link_optimal, link_to: link });
            if !config.stock {
                if let Some(update) = update_from {
                    diagnostics
                        .push(Diagnostic::MovementDiscontinuity { from: update, to: link_optimal });
                }
            }
        }
    }

    if config.update {
        if let Some(update) = update_from {
            if update_optimal != update {
                diagnostics.push(Diagnostic::UpdateDiscontinuity {
                    expected: update_optimal,
                    update_from: update,
                });
                if !config.stock {
                    diagnostics
                        .push(Diagnostic::MovementDiscontinuity { from: update, to: update_optimal });
                }
            }
        }
    }

    if adjusted.iter().any(|&value| value < 0.0) {
        diagnostics.push(Diagnostic::NegativeAdjustedValues);
    }

    let non_positive = if config.zero_override {
        distributor.iter().any(|&value| value < 0.0)
    } else {
        distributor.iter().any(|&value| value <= 0.0)
    };
    if non_positive {
        diagnostics.push(Diagnostic::NonPositiveDistributor);
    }
}
