//! reference — reference-interval construction for benchmark constraints.
//!
//! Purpose
//! -------
//! Map benchmark periods onto the distributor index space as inclusive
//! 1-based intervals, the coordinate system in which the adjustment engine
//! and the rounding stage both operate.
//!
//! Downstream usage
//! ----------------
//! - `crate::adjustment` sums distributor values over each interval to form
//!   the constraint discrepancies.
//! - `crate::rounding` walks the intervals as rounding windows.
pub mod intervals;

pub use intervals::ReferenceIntervals;
