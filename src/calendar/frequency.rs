//! calendar::frequency — observation frequencies and the distributor/benchmark
//! frequency pairing.
//!
//! Purpose
//! -------
//! Define the three fixed-radix observation frequencies handled by the crate
//! (annual, quarterly, monthly) and the validated [`FrequencySpec`] that pairs
//! a high-frequency distributor series with a lower-frequency benchmark
//! series, including the fiscal lag that shifts the benchmark calendar
//! relative to the distributor calendar.
//!
//! Key behaviors
//! -------------
//! - Construct [`Frequency`] values from raw periods-per-year counts,
//!   rejecting anything other than 1, 4, or 12.
//! - Construct [`FrequencySpec`] values, rejecting unsupported frequency
//!   pairings and out-of-range fiscal lags.
//! - Report the number of distributor periods covered by one benchmark
//!   period (`periods_per_benchmark`), the step used when laying out
//!   reference intervals.
//!
//! Invariants & assumptions
//! ------------------------
//! - Supported distributor/benchmark pairings are quarterly/annual,
//!   monthly/annual, and monthly/quarterly; the benchmark frequency is
//!   always strictly lower than the distributor frequency.
//! - `fiscal_lag` lies strictly inside `(-per_year, per_year)` of the
//!   distributor frequency.
//!
//! Conventions
//! -----------
//! - Frequencies are compared and stored as enum values; raw counts appear
//!   only at construction time and in error payloads.
use crate::calendar::errors::{CalendarError, CalendarResult};

/// Observation frequency of a series, as periods per year.
///
/// The crate performs fixed-radix period arithmetic at exactly these three
/// frequencies; there is deliberately no general-purpose date handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// One observation per year (`PP` is always 01).
    Annual,
    /// Four observations per year (`PP` in 01..=04).
    Quarterly,
    /// Twelve observations per year (`PP` in 01..=12).
    Monthly,
}

impl Frequency {
    /// Construct a [`Frequency`] from a raw periods-per-year count.
    ///
    /// Parameters
    /// ----------
    /// - `per_year`: `i64`
    ///   Number of observations per year; must be 1, 4, or 12.
    ///
    /// Returns
    /// -------
    /// `CalendarResult<Frequency>`
    ///   The matching frequency, or `CalendarError::InvalidFrequency` for any
    ///   other count.
    pub fn from_per_year(per_year: i64) -> CalendarResult<Frequency> {
        match per_year {
            1 => Ok(Frequency::Annual),
            4 => Ok(Frequency::Quarterly),
            12 => Ok(Frequency::Monthly),
            other => Err(CalendarError::InvalidFrequency(other)),
        }
    }

    /// Number of periods per year at this frequency.
    #[inline]
    pub fn per_year(self) -> i64 {
        match self {
            Frequency::Annual => 1,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }
}

/// FrequencySpec — validated distributor/benchmark frequency pairing.
///
/// Purpose
/// -------
/// Bundle the distributor frequency, the benchmark frequency, and the fiscal
/// lag shifting the benchmark calendar relative to the distributor calendar.
/// All downstream calendar and interval computations take their frequency
/// context from this one value.
///
/// Parameters
/// ----------
/// Constructed via [`FrequencySpec::new`] with:
/// - `freq`: [`Frequency`]
///   Distributor frequency (quarterly or monthly).
/// - `bench_freq`: [`Frequency`]
///   Benchmark frequency (annual or quarterly), strictly lower than `freq`.
/// - `fiscal_lag`: `i64`
///   Shift, in distributor periods, of the benchmark calendar relative to
///   the distributor calendar. Must lie strictly inside
///   `(-freq.per_year(), freq.per_year())`.
///
/// Fields
/// ------
/// - `freq`: distributor frequency.
/// - `bench_freq`: benchmark frequency.
/// - `fiscal_lag`: fiscal-year shift in distributor periods.
///
/// Invariants
/// ----------
/// - `(freq, bench_freq)` is one of (quarterly, annual), (monthly, annual),
///   (monthly, quarterly).
/// - `fiscal_lag.abs() < freq.per_year()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencySpec {
    /// Distributor frequency.
    pub freq: Frequency,
    /// Benchmark frequency (strictly lower than `freq`).
    pub bench_freq: Frequency,
    /// Fiscal-year shift of the benchmark calendar, in distributor periods.
    pub fiscal_lag: i64,
}

impl FrequencySpec {
    /// Construct a validated frequency pairing.
    ///
    /// Returns
    /// -------
    /// `CalendarResult<FrequencySpec>`
    ///   The validated pairing, or:
    ///   - `CalendarError::UnsupportedFrequencyPair` when `(freq, bench_freq)`
    ///     is not quarterly/annual, monthly/annual, or monthly/quarterly;
    ///   - `CalendarError::InvalidFiscalLag` when `|fiscal_lag|` reaches a
    ///     full distributor year.
    pub fn new(freq: Frequency, bench_freq: Frequency, fiscal_lag: i64) -> CalendarResult<Self> {
        let supported = matches!(
            (freq, bench_freq),
            (Frequency::Quarterly, Frequency::Annual)
                | (Frequency::Monthly, Frequency::Annual)
                | (Frequency::Monthly, Frequency::Quarterly)
        );
        if !supported {
            return Err(CalendarError::UnsupportedFrequencyPair {
                per_year: freq.per_year(),
                bench_per_year: bench_freq.per_year(),
            });
        }
        if fiscal_lag.abs() >= freq.per_year() {
            return Err(CalendarError::InvalidFiscalLag { lag: fiscal_lag, per_year: freq.per_year() });
        }
        Ok(FrequencySpec { freq, bench_freq, fiscal_lag })
    }

    /// Number of distributor periods covered by one benchmark period.
    ///
    /// Returns 3 for monthly/quarterly, 12 for monthly/annual, and 4 for
    /// quarterly/annual — the `inc` step used when laying out reference
    /// intervals.
    #[inline]
    pub fn periods_per_benchmark(&self) -> i64 {
        if self.bench_freq == Frequency::Quarterly {
            3
        } else if self.freq == Frequency::Monthly {
            12
        } else {
            4
        }
    }
}
