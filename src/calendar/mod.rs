//! calendar — period codes, frequency pairings, and benchmark alignment.
//!
//! Purpose
//! -------
//! Provide the calendar layer of the benchmarking pipeline: `YYYYPP` period
//! arithmetic, validated distributor/benchmark frequency pairings, and the
//! derivation of the benchmark span a distributor span can support.
//!
//! Downstream usage
//! ----------------
//! - `crate::reference` consumes [`Period`], [`PeriodRange`], and
//!   [`benchmark_window`] to place benchmark intervals on the distributor
//!   axis.
//! - `crate::reconcile` validates request dates through [`FrequencySpec`]
//!   and [`Period::from_code`] before any numerical work starts.
pub mod errors;
pub mod frequency;
pub mod period;
pub mod window;

pub use errors::{CalendarError, CalendarResult};
pub use frequency::{Frequency, FrequencySpec};
pub use period::{count_points, starts_benchmark_period, stock_subperiod, Period, PeriodRange};
pub use window::benchmark_window;
