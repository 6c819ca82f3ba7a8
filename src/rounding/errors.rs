//! rounding::errors — error types for controlled rounding.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the rounding subsystem,
//! with the usual conversion to Python exceptions behind the
//! `python-bindings` feature.
//!
//! Invariants & assumptions
//! ------------------------
//! - Window-level variants are detected before any value is modified
//!   within the offending window, so a failed call leaves its input
//!   untouched; the benchmark-count check runs before any window at all.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

/// Result alias for rounding paths that may produce [`RoundingError`].
pub type RoundingResult<T> = Result<T, RoundingError>;

/// RoundingError — failures of sum-preserving rounding.
///
/// Variants
/// --------
/// - `CapacityExceeded { len, capacity }`
///   A rounding window holds more values than the configured capacity.
/// - `IrreparableDiscrepancy { needed, window }`
///   Matching the rounded target would require adjusting more values than
///   the window contains, meaning the inputs disagree by more than one
///   rounding unit per element.
/// - `BenchmarkCountMismatch { benchmarks, intervals }`
///   A series-level call supplied fewer benchmark values than reference
///   intervals, so at least one window has no target.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundingError {
    CapacityExceeded { len: usize, capacity: usize },
    IrreparableDiscrepancy { needed: f64, window: usize },
    BenchmarkCountMismatch { benchmarks: usize, intervals: usize },
}

impl std::error::Error for RoundingError {}

impl std::fmt::Display for RoundingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundingError::CapacityExceeded { len, capacity } => {
                write!(
                    f,
                    "Rounding window holds {len} values, above the capacity of {capacity}."
                )
            }
            RoundingError::IrreparableDiscrepancy { needed, window } => {
                write!(
                    f,
                    "Matching the rounded target needs {needed} unit adjustments over a \
                     window of {window} values. The window sum and the target disagree by \
                     more than one unit per value."
                )
            }
            RoundingError::BenchmarkCountMismatch { benchmarks, intervals } => {
                write!(
                    f,
                    "Received {benchmarks} benchmark values for {intervals} reference \
                     intervals. Each interval needs one target."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<RoundingError> for PyErr {
    fn from(err: RoundingError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic `Display` formatting for RoundingError variants.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that both variants embed their payloads in the message.
    //
    // Given
    // -----
    // - One value of each `RoundingError` variant.
    //
    // Expect
    // ------
    // - Messages are non-empty and contain the payload numbers.
    fn variants_embed_payloads_in_messages() {
        // Arrange
        let capacity = RoundingError::CapacityExceeded { len: 301, capacity: 300 };
        let discrepancy = RoundingError::IrreparableDiscrepancy { needed: 7.5, window: 4 };
        let mismatch = RoundingError::BenchmarkCountMismatch { benchmarks: 1, intervals: 2 };

        // Act & Assert
        assert!(capacity.to_string().contains("301"));
        assert!(capacity.to_string().contains("300"));
        assert!(discrepancy.to_string().contains("7.5"));
        assert!(discrepancy.to_string().contains('4'));
        assert!(mismatch.to_string().contains('1'));
        assert!(mismatch.to_string().contains('2'));
    }
}
