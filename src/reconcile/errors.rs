//! reconcile::errors — error types for the reconciliation orchestrator.
//!
//! Purpose
//! -------
//! Provide the top-level error enum for a reconciliation request, wrapping
//! the calendar, adjustment, and rounding errors of the stages it drives
//! and adding the request-level validation failures only the orchestrator
//! can detect.
//!
//! Conventions
//! -----------
//! - Fatal conditions are errors; recoverable observations about an
//!   otherwise valid run are [`crate::reconcile::Diagnostic`] values on
//!   the outcome instead.
use crate::adjustment::AdjustmentError;
use crate::calendar::CalendarError;
use crate::rounding::RoundingError;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

/// Result alias for reconciliation paths that may produce
/// [`ReconcileError`].
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// ReconcileError — fatal failures of a reconciliation request.
///
/// Variants
/// --------
/// - `Calendar(err)`, `Adjustment(err)`, `Rounding(err)`
///   A stage error, wrapped unchanged.
/// - `InvalidSpan { from, to }`
///   The distributor span ends before it starts (`YYYYPP` codes).
/// - `DistributorLengthMismatch { expected, actual }`
///   The distributor series does not cover its declared span.
/// - `BenchmarkLengthMismatch { expected, actual }`
///   The benchmark series does not match the derived benchmark window
///   (plus one for a linked request).
/// - `MissingLinkPoint`
///   A linked request without a link-to date.
/// - `MissingUpdatePoint`
///   An updating request without an update-from date.
/// - `NoBenchmarkSpan`
///   The distributor span covers no complete benchmark period, so there
///   is nothing to reconcile against.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileError {
    Calendar(CalendarError),
    Adjustment(AdjustmentError),
    Rounding(RoundingError),
    InvalidSpan { from: i64, to: i64 },
    DistributorLengthMismatch { expected: i64, actual: usize },
    BenchmarkLengthMismatch { expected: i64, actual: usize },
    MissingLinkPoint,
    MissingUpdatePoint,
    NoBenchmarkSpan,
}

impl std::error::Error for ReconcileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReconcileError::Calendar(err) => Some(err),
            ReconcileError::Adjustment(err) => Some(err),
            ReconcileError::Rounding(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileError::Calendar(err) => write!(f, "Calendar error: {err}"),
            ReconcileError::Adjustment(err) => write!(f, "Adjustment error: {err}"),
            ReconcileError::Rounding(err) => write!(f, "Rounding error: {err}"),
            ReconcileError::InvalidSpan { from, to } => {
                write!(f, "Invalid distributor span: {from}..{to} ends before it starts.")
            }
            ReconcileError::DistributorLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "Distributor series has {actual} values but its span covers {expected} \
                     periods."
                )
            }
            ReconcileError::BenchmarkLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "Benchmark series has {actual} values but the covered benchmark window \
                     expects {expected}."
                )
            }
            ReconcileError::MissingLinkPoint => {
                write!(f, "Linked reconciliation requires a link-to date.")
            }
            ReconcileError::MissingUpdatePoint => {
                write!(f, "Updating reconciliation requires an update-from date.")
            }
            ReconcileError::NoBenchmarkSpan => {
                write!(
                    f,
                    "The distributor span covers no complete benchmark period. Nothing to \
                     reconcile against."
                )
            }
        }
    }
}

impl From<CalendarError> for ReconcileError {
    fn from(err: CalendarError) -> ReconcileError {
        ReconcileError::Calendar(err)
    }
}

impl From<AdjustmentError> for ReconcileError {
    fn from(err: AdjustmentError) -> ReconcileError {
        ReconcileError::Adjustment(err)
    }
}

impl From<RoundingError> for ReconcileError {
    fn from(err: RoundingError) -> ReconcileError {
        ReconcileError::Rounding(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<ReconcileError> for PyErr {
    fn from(err: ReconcileError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
