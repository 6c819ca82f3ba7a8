//! adjustment::kernel — smoothness-kernel matrices for the constraint system.
//!
//! Purpose
//! -------
//! Build the working matrices of the quadratic-minimization step: the
//! kernel-times-aggregation matrix `qinvw` (one column per benchmark), its
//! aggregated Gram form `wqinvw`, and the weighted constraint
//! discrepancies.
//!
//! Key behaviors
//! -------------
//! - Materialize only `tt x mm` and `mm x mm` matrices; the dense
//!   `tt x tt` autocorrelation kernel exists one row at a time.
//! - Scale kernel entries by the proportionality profile (`x` in
//!   proportional mode, ones in additive mode) and the mean distributor
//!   level, matching the near-unit-root movement-preservation kernel
//!   `rho^|r-c|` with `rho` just below one.
//! - Fold per-observation weights into both the aggregation and the
//!   discrepancies; index-type benchmarks are rescaled by the interval's
//!   weight sum before differencing.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are pre-validated by the engine: intervals address
//!   `1..=tt`, weights are strictly positive and cover every observation.
//! - `wqinvw` is symmetric positive definite for valid disjoint intervals;
//!   the solver still guards vanishing pivots.
use ndarray::{Array1, Array2};

use crate::adjustment::errors::{AdjustmentError, AdjustmentResult};
use crate::reference::ReferenceIntervals;

/// Autocorrelation parameter of the movement-preservation kernel. Kept
/// just below one so the constraint system stays invertible while the
/// penalty behaves like a first-difference smoother.
pub(crate) const RHO: f64 = 0.999_999_99;

/// Fallible buffer allocation for a working matrix.
fn try_matrix_buf(rows: usize, cols: usize) -> AdjustmentResult<Vec<f64>> {
    let elements = rows * cols;
    let mut buf = Vec::new();
    buf.try_reserve_exact(elements)
        .map_err(|_| AdjustmentError::ResourceExhausted { elements })?;
    Ok(buf)
}

/// Kernel-times-aggregation matrix, `tt x mm`.
///
/// Entry `(r, m)` is the weighted sum over benchmark `m`'s interval of
/// `rho^|r-c| * x2[r] / xbar * x2[c]`, where `x2` is the distributor in
/// proportional mode and all ones in additive mode.
pub(crate) fn build_qinvw(
    x: &[f64],
    intervals: &ReferenceIntervals,
    weights: &[f64],
    proportional: bool,
) -> AdjustmentResult<Array2<f64>> {
    let tt = x.len();
    let mm = intervals.len();
    let xbar = x.iter().sum::<f64>() / tt as f64;

    let profile = |t: usize| if proportional { x[t] } else { 1.0 };

    let mut buf = try_matrix_buf(tt, mm)?;
    for r in 0..tt {
        let scale = profile(r) / xbar;
        for m in 0..mm {
            let (tau, kappa) = intervals.window(m);
            let mut total = 0.0;
            for c in (tau - 1) as usize..kappa as usize {
                let expo = (c as i64 - r as i64).unsigned_abs() as i32;
                total += RHO.powi(expo) * scale * profile(c) * weights[c];
            }
            buf.push(total);
        }
    }

    Ok(Array2::from_shape_vec((tt, mm), buf).expect("buffer sized to shape"))
}

/// Aggregated Gram matrix, `mm x mm`: the kernel restricted to benchmark
/// aggregates on both sides.
pub(crate) fn build_wqinvw(
    qinvw: &Array2<f64>,
    intervals: &ReferenceIntervals,
    weights: &[f64],
) -> AdjustmentResult<Array2<f64>> {
    let mm = intervals.len();

    let mut buf = try_matrix_buf(mm, mm)?;
    for r in 0..mm {
        let (tau, kappa) = intervals.window(r);
        for c in 0..mm {
            let mut total = 0.0;
            for t in (tau - 1) as usize..kappa as usize {
                total += weights[t] * qinvw[[t, c]];
            }
            buf.push(total);
        }
    }

    Ok(Array2::from_shape_vec((mm, mm), buf).expect("buffer sized to shape"))
}

/// Weighted additive discrepancies, one per benchmark.
///
/// For benchmark `m` the discrepancy is `y[m] - sum(w * x)` over its
/// interval; for index-type benchmarks `y[m]` is first scaled by the
/// interval's weight sum, converting a per-period level into a total.
pub(crate) fn weighted_discrepancies(
    x: &[f64],
    benchmarks: &[f64],
    intervals: &ReferenceIntervals,
    weights: &[f64],
    index_series: bool,
) -> Array1<f64> {
    let mm = intervals.len();
    let mut disc = Array1::zeros(mm);

    for m in 0..mm {
        let (tau, kappa) = intervals.window(m);
        let mut total = 0.0;
        let mut weight_sum = 0.0;
        for t in (tau - 1) as usize..kappa as usize {
            weight_sum += weights[t];
            total += weights[t] * x[t];
        }
        let target = if index_series { benchmarks[m] * weight_sum } else { benchmarks[m] };
        disc[m] = target - total;
    }

    disc
}
