//! calendar::errors — shared error types for period and frequency handling.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for calendar construction and
//! validation, together with a conversion layer to Python exceptions for
//! PyO3-based bindings. Construction of frequencies, period codes, and
//! frequency specifications is validated here; period *arithmetic* itself
//! never fails by design and reports nothing through this module.
//!
//! Key behaviors
//! -------------
//! - Define [`CalendarResult`] and [`CalendarError`] as the canonical result
//!   and error types for calendar constructors.
//! - Attach human-readable `Display` messages to each error variant so that
//!   diagnostics are meaningful without additional context.
//! - Implement `From<CalendarError> for PyErr` to surface validation errors
//!   as `ValueError` to Python callers when the `python-bindings` feature is
//!   enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Errors are emitted only by fallible constructors (`Frequency` lookup,
//!   `Period::new` / `Period::from_code`, `FrequencySpec::new`); once a value
//!   exists, every calendar operation on it is total.
//! - `CalendarError` values are small, cheap to clone, and suitable for use
//!   in both unit tests and higher-level orchestration code.
//!
//! Conventions
//! -----------
//! - Error payloads carry raw integers (`i64` period codes, periods-per-year
//!   counts) rather than calendar types, keeping this module free of cyclic
//!   imports.
//! - Messages are phrased in terms of domain constraints (e.g. "period must
//!   lie in 1..=frequency") rather than low-level details.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

/// Result alias for calendar construction paths that may produce
/// [`CalendarError`].
pub type CalendarResult<T> = Result<T, CalendarError>;

/// CalendarError — validation failures for calendar value construction.
///
/// Variants
/// --------
/// - `InvalidFrequency(per_year)`
///   The periods-per-year count is not one of 1 (annual), 4 (quarterly) or
///   12 (monthly).
/// - `InvalidPeriodCode { code, per_year }`
///   A `YYYYPP` period code has a `PP` component outside `1..=per_year`.
/// - `UnsupportedFrequencyPair { per_year, bench_per_year }`
///   The distributor/benchmark frequency pairing is not one of the supported
///   combinations (quarterly/annual, monthly/annual, monthly/quarterly).
/// - `InvalidFiscalLag { lag, per_year }`
///   The fiscal lag falls outside the open interval
///   `(-per_year, per_year)`.
///
/// Notes
/// -----
/// - Implements [`std::error::Error`] and [`std::fmt::Display`] for
///   idiomatic `?`-based propagation, and converts to a Python `ValueError`
///   at the PyO3 boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarError {
    InvalidFrequency(i64),
    InvalidPeriodCode { code: i64, per_year: i64 },
    UnsupportedFrequencyPair { per_year: i64, bench_per_year: i64 },
    InvalidFiscalLag { lag: i64, per_year: i64 },
}

impl std::error::Error for CalendarError {}

impl std::fmt::Display for CalendarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarError::InvalidFrequency(per_year) => {
                write!(f, "Invalid frequency: {per_year}. Must be 1, 4, or 12 periods per year.")
            }
            CalendarError::InvalidPeriodCode { code, per_year } => {
                write!(
                    f,
                    "Invalid period code: {code}. The PP component of YYYYPP must lie in \
                     1..={per_year}."
                )
            }
            CalendarError::UnsupportedFrequencyPair { per_year, bench_per_year } => {
                write!(
                    f,
                    "Unsupported frequency pair: distributor {per_year}, benchmark \
                     {bench_per_year}. Supported pairs are 4/1, 12/1, and 12/4."
                )
            }
            CalendarError::InvalidFiscalLag { lag, per_year } => {
                write!(
                    f,
                    "Invalid fiscal lag: {lag}. Must lie strictly between -{per_year} and \
                     {per_year}."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<CalendarError> for PyErr {
    fn from(err: CalendarError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
