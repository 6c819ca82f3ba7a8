//! adjustment::errors — error types for the constrained adjustment engine.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the quadratic-minimization
//! engine's input validation and resource handling, together with a
//! conversion layer to Python exceptions for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`AdjustmentResult`] and [`AdjustmentError`] as the canonical
//!   result and error types for the adjustment subtree.
//! - Attach human-readable `Display` messages to each variant so failures
//!   identify the offending series, interval, or weight directly.
//! - Implement `From<AdjustmentError> for PyErr` as `ValueError` when the
//!   `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every variant is raised before any numerical work starts, except
//!   `ResourceExhausted`, which is raised when a working matrix cannot be
//!   allocated.
//! - Singularity of the constraint system is not an error: the solver clamps
//!   vanishing pivots and produces a least-disturbance answer regardless.
//!
//! Conventions
//! -----------
//! - Payloads carry plain lengths and 1-based interval indices, matching
//!   how reference intervals address the distributor.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

/// Result alias for adjustment paths that may produce [`AdjustmentError`].
pub type AdjustmentResult<T> = Result<T, AdjustmentError>;

/// AdjustmentError — validation and resource failures of the engine.
///
/// Variants
/// --------
/// - `EmptyDistributor`
///   The distributor series has no observations.
/// - `NoBenchmarks`
///   No benchmark constraint was supplied.
/// - `LengthMismatch { benchmarks, intervals }`
///   The benchmark series and the reference intervals disagree in count.
/// - `WeightLengthMismatch { weights, points }`
///   Explicit weights were supplied but do not cover every distributor
///   observation.
/// - `NonPositiveWeight { index, weight }`
///   A weight at the given 0-based index is zero or negative.
/// - `IntervalOutOfRange { interval, tau, kappa, points }`
///   Reference interval `interval` (0-based) addresses indices outside
///   `1..=points`.
/// - `EmptyInterval { interval, tau, kappa }`
///   Reference interval `interval` has `kappa < tau`.
/// - `ResourceExhausted { elements }`
///   A working matrix of `elements` values could not be allocated.
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustmentError {
    EmptyDistributor,
    NoBenchmarks,
    LengthMismatch { benchmarks: usize, intervals: usize },
    WeightLengthMismatch { weights: usize, points: usize },
    NonPositiveWeight { index: usize, weight: f64 },
    IntervalOutOfRange { interval: usize, tau: i64, kappa: i64, points: usize },
    EmptyInterval { interval: usize, tau: i64, kappa: i64 },
    ResourceExhausted { elements: usize },
}

impl std::error::Error for AdjustmentError {}

impl std::fmt::Display for AdjustmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustmentError::EmptyDistributor => {
                write!(f, "Distributor series is empty. At least one observation is required.")
            }
            AdjustmentError::NoBenchmarks => {
                write!(f, "No benchmark constraints supplied. At least one benchmark is required.")
            }
            AdjustmentError::LengthMismatch { benchmarks, intervals } => {
                write!(
                    f,
                    "Benchmark series has {benchmarks} values but {intervals} reference \
                     intervals were built. The two must agree."
                )
            }
            AdjustmentError::WeightLengthMismatch { weights, points } => {
                write!(
                    f,
                    "Weight vector has {weights} entries for {points} distributor \
                     observations. One weight per observation is required."
                )
            }
            AdjustmentError::NonPositiveWeight { index, weight } => {
                write!(
                    f,
                    "Weight at index {index} is {weight}. Weights must be strictly positive."
                )
            }
            AdjustmentError::IntervalOutOfRange { interval, tau, kappa, points } => {
                write!(
                    f,
                    "Reference interval {interval} spans indices {tau}..={kappa} but the \
                     distributor has only {points} observations."
                )
            }
            AdjustmentError::EmptyInterval { interval, tau, kappa } => {
                write!(
                    f,
                    "Reference interval {interval} spans indices {tau}..={kappa}, which \
                     contains no observation."
                )
            }
            AdjustmentError::ResourceExhausted { elements } => {
                write!(
                    f,
                    "Could not allocate a working matrix of {elements} values. You might \
                     want to try smaller series."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<AdjustmentError> for PyErr {
    fn from(err: AdjustmentError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
