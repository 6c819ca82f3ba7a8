//! calendar::period — frequency-tagged period codes and their arithmetic.
//!
//! Purpose
//! -------
//! Implement the fixed-radix period arithmetic underlying benchmarking:
//! `YYYYPP` period codes, period addition with year carry, inclusive period
//! counts across (possibly mixed) frequencies, and the benchmark-boundary
//! predicates used when aligning a distributor span to a benchmark calendar.
//!
//! Key behaviors
//! -------------
//! - Parse and format 6-digit `YYYYPP` codes via [`Period::from_code`] and
//!   [`Period::code`], validating `PP` against the frequency at construction.
//! - Add signed period offsets with [`Period::offset`], carrying whole years
//!   so the period component always stays in `1..=per_year`.
//! - Count periods inclusively between two codes with [`count_points`],
//!   renormalizing the endpoints when quarterly and monthly granularities
//!   mix (conversion factor 3).
//! - Test benchmark-boundary alignment ([`starts_benchmark_period`]) and map
//!   a period to its enclosing benchmark sub-period for point-in-time series
//!   ([`stock_subperiod`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - After any arithmetic, `period` lies in `1..=freq.per_year()`; the year
//!   carries by exactly one unit per overflow or underflow of the period
//!   range, repeated as needed for offsets larger than one cycle.
//! - Arithmetic is total: no operation in this module fails. Nonsensical
//!   inputs (e.g. a span with `to < from`) produce well-defined but possibly
//!   meaningless values — negative or zero counts — that downstream
//!   validation rejects.
//! - Offsets are small in practice (a few years at most); the carry loop is
//!   iterative rather than modular, which is simpler and fast enough for the
//!   observed magnitudes.
//!
//! Conventions
//! -----------
//! - Ordering on [`Period`] is chronological: by year, then by period, which
//!   coincides with numeric ordering of the `YYYYPP` codes.
//! - Counts are signed (`i64`): `count_points(from, to, f, f)` is the
//!   1-based index of `to` within the span starting at `from`, and is
//!   non-positive when `to` precedes `from`.
use crate::calendar::errors::{CalendarError, CalendarResult};
use crate::calendar::frequency::Frequency;

/// A point on a frequency-tagged calendar: a year and a period within it.
///
/// Purpose
/// -------
/// Represent one observation slot of a series at a given [`Frequency`],
/// externally written as the 6-digit decimal code `YYYYPP`.
///
/// Invariants
/// ----------
/// - `period` lies in `1..=per_year` of the frequency the value was
///   constructed against; [`Period::offset`] preserves this.
///
/// Notes
/// -----
/// - The frequency is not stored on the value; callers thread it through
///   arithmetic explicitly, matching how a single reconciliation request
///   carries one [`crate::calendar::FrequencySpec`] for all its periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Period {
    /// Calendar year (the `YYYY` component).
    pub year: i32,
    /// Period within the year (the `PP` component), 1-based.
    pub period: u32,
}

/// Inclusive span of distributor periods, `from..=to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRange {
    /// First period of the span.
    pub from: Period,
    /// Last period of the span (inclusive).
    pub to: Period,
}

impl Period {
    /// Construct a period from its components, validating against `freq`.
    ///
    /// Returns
    /// -------
    /// `CalendarResult<Period>`
    ///   The period, or `CalendarError::InvalidPeriodCode` when `period` lies
    ///   outside `1..=freq.per_year()`.
    pub fn new(year: i32, period: u32, freq: Frequency) -> CalendarResult<Period> {
        if period == 0 || i64::from(period) > freq.per_year() {
            return Err(CalendarError::InvalidPeriodCode {
                code: i64::from(year) * 100 + i64::from(period),
                per_year: freq.per_year(),
            });
        }
        Ok(Period { year, period })
    }

    /// Parse a 6-digit `YYYYPP` code, validating `PP` against `freq`.
    ///
    /// Parameters
    /// ----------
    /// - `code`: `i64`
    ///   Decimal period code, e.g. `202311` for November 2023 at monthly
    ///   frequency or `202304` for 2023Q4 at quarterly frequency.
    /// - `freq`: [`Frequency`]
    ///   Frequency whose period range bounds the `PP` component.
    ///
    /// Returns
    /// -------
    /// `CalendarResult<Period>`
    ///   The parsed period, or `CalendarError::InvalidPeriodCode`.
    pub fn from_code(code: i64, freq: Frequency) -> CalendarResult<Period> {
        let period = code.rem_euclid(100);
        let year = (code - period) / 100;
        if period == 0 || period > freq.per_year() {
            return Err(CalendarError::InvalidPeriodCode { code, per_year: freq.per_year() });
        }
        Ok(Period { year: year as i32, period: period as u32 })
    }

    /// The 6-digit `YYYYPP` code of this period.
    #[inline]
    pub fn code(&self) -> i64 {
        i64::from(self.year) * 100 + i64::from(self.period)
    }

    /// Add `delta` periods at frequency `freq`, carrying whole years.
    ///
    /// The period component always lands back in `1..=freq.per_year()`; the
    /// year moves by one unit per overflow or underflow, repeated as needed.
    /// Total for any `delta`; round-trips exactly with the negated offset.
    pub fn offset(self, freq: Frequency, delta: i64) -> Period {
        let per_year = freq.per_year();
        let mut period = i64::from(self.period) + delta;
        let mut year = i64::from(self.year);

        while period > per_year {
            period -= per_year;
            year += 1;
        }
        while period < 1 {
            period += per_year;
            year -= 1;
        }

        Period { year: year as i32, period: period as u32 }
    }
}

/// Inclusive number of periods covering `[from, to]`.
///
/// Parameters
/// ----------
/// - `from`, `to`: [`Period`]
///   Span endpoints. `from` is tagged with `freq_from`, `to` with the same
///   frequency; when `freq_from` and `freq_to` mix quarterly and monthly,
///   the corresponding endpoint's period component is renormalized to the
///   finer granularity using the factor 3 (a quarter starts on its first
///   month).
/// - `freq_from`: [`Frequency`]
///   Frequency whose periods are being counted.
/// - `freq_to`: [`Frequency`]
///   Granularity context of the opposite calendar; equal to `freq_from`
///   for a plain same-frequency count.
///
/// Returns
/// -------
/// `i64`
///   `(yearTo - yearFrom) * freq_from + periodTo' - periodFrom' + 1`. Both
///   ends are included; the result is non-positive when `to` precedes
///   `from`, which downstream validation treats as a configuration error.
pub fn count_points(from: Period, to: Period, freq_from: Frequency, freq_to: Frequency) -> i64 {
    let mut p_from = i64::from(from.period);
    let mut p_to = i64::from(to.period);

    if freq_from == Frequency::Quarterly && freq_to == Frequency::Monthly {
        p_from = p_from * 3 - 2;
    }
    if freq_from == Frequency::Monthly && freq_to == Frequency::Quarterly {
        p_to = p_to * 3 - 2;
    }

    (i64::from(to.year) - i64::from(from.year)) * freq_from.per_year() + p_to - p_from + 1
}

/// Whether a distributor period marks the start of a benchmark period.
///
/// At annual benchmark frequency only period 1 opens a benchmark year; at
/// quarterly benchmark frequency the opening months are 1, 4, 7, and 10.
#[inline]
pub fn starts_benchmark_period(period: u32, bench_freq: Frequency) -> bool {
    match bench_freq {
        Frequency::Annual => period == 1,
        _ => matches!(period, 1 | 4 | 7 | 10),
    }
}

/// Benchmark sub-period enclosing a distributor period, for stock series.
///
/// Point-in-time (stock) benchmarks reference a single instant, so the
/// benchmark calendar position is the enclosing sub-period: always 1 at
/// annual benchmark frequency, `((period - 1) / 3) + 1` at quarterly.
#[inline]
pub fn stock_subperiod(period: u32, bench_freq: Frequency) -> u32 {
    match bench_freq {
        Frequency::Annual => 1,
        _ => ((period - 1) / 3) + 1,
    }
}
