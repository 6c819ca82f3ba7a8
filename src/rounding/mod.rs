//! rounding — controlled rounding of benchmarked series.
//!
//! Purpose
//! -------
//! Round adjusted series to a fixed number of decimals without breaking
//! the benchmark constraint: each benchmark window keeps its rounded
//! total, and uncovered stretches keep their own rounded sums.
//!
//! Downstream usage
//! ----------------
//! - `crate::reconcile` applies [`round_series_to_benchmarks`] when a
//!   decimal count is configured; [`round_to_sum`] is also exposed
//!   directly for standalone use.
pub mod errors;
pub mod round;
pub mod series;

pub use errors::{RoundingError, RoundingResult};
pub use round::{round_half_away, round_to_sum, DEFAULT_CAPACITY};
pub use series::round_series_to_benchmarks;
