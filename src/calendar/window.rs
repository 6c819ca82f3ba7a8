//! calendar::window — derivation of the covered benchmark span.
//!
//! Purpose
//! -------
//! Given a distributor span, compute the span of benchmark periods the
//! distributor data can actually support: the earliest benchmark period
//! whose start falls on or after the (fiscal-shifted) distributor start,
//! through the latest benchmark period the distributor fully covers.
//!
//! Key behaviors
//! -------------
//! - Shift both distributor endpoints backwards by the fiscal lag before
//!   aligning, so a fiscal-year benchmark calendar lines up with the
//!   distributor's calendar periods.
//! - Flow series: walk the start forward to the next benchmark boundary;
//!   stock series: snap the start to the enclosing benchmark sub-period.
//! - Clip the end to the last fully covered benchmark period, walking back
//!   to a period-closing month for quarterly benchmarks and using the
//!   year-completeness test for annual ones.
//!
//! Invariants & assumptions
//! ------------------------
//! - The result is expressed on the benchmark calendar (`period` in
//!   `1..=bench_freq.per_year()`).
//! - A distributor span too short to cover any benchmark period yields a
//!   window with `to < from`; callers detect this through the interval
//!   builder producing no benchmark intervals.
use crate::calendar::frequency::{Frequency, FrequencySpec};
use crate::calendar::period::{starts_benchmark_period, stock_subperiod, Period, PeriodRange};

/// Benchmark span supported by a distributor span.
///
/// Parameters
/// ----------
/// - `range`: [`PeriodRange`]
///   Distributor span, on the distributor calendar of `spec.freq`.
/// - `spec`: `&`[`FrequencySpec`]
///   Frequency pairing and fiscal lag of the request.
/// - `stock`: `bool`
///   Whether the benchmarks are point-in-time (stock) values rather than
///   period aggregates (flow).
///
/// Returns
/// -------
/// [`PeriodRange`]
///   First and last benchmark period, on the benchmark calendar. `to`
///   precedes `from` when the distributor span covers no benchmark period.
///
/// Notes
/// -----
/// - For flow series the end is the last benchmark period whose final
///   distributor sub-period lies inside the span; for stock series the same
///   clipping applies, matching how point-in-time benchmarks are anchored
///   on their closing period.
pub fn benchmark_window(range: PeriodRange, spec: &FrequencySpec, stock: bool) -> PeriodRange {
    let freq = spec.freq;
    let bench_freq = spec.bench_freq;

    // Start: shift by the fiscal lag, then align to the benchmark calendar.
    let mut start = range.from.offset(freq, -spec.fiscal_lag);
    let bfrom = if stock {
        Period { year: start.year, period: stock_subperiod(start.period, bench_freq) }
    } else {
        while !starts_benchmark_period(start.period, bench_freq) {
            start = start.offset(freq, 1);
        }
        match bench_freq {
            Frequency::Annual => start,
            _ => Period { year: start.year, period: (start.period + 2) / 3 },
        }
    };

    // End: shift by the fiscal lag, then clip to full coverage.
    let mut end = range.to.offset(freq, -spec.fiscal_lag);
    let bto = match bench_freq {
        Frequency::Annual => {
            if i64::from(end.period) == freq.per_year() {
                Period { year: end.year, period: 1 }
            } else {
                Period { year: end.year - 1, period: 1 }
            }
        }
        _ => {
            while !matches!(end.period, 3 | 6 | 9 | 12) {
                end = end.offset(freq, -1);
            }
            Period { year: end.year, period: end.period / 3 }
        }
    };

    PeriodRange { from: bfrom, to: bto }
}
