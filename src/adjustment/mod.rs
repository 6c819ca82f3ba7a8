//! adjustment — constrained quadratic-minimization of a distributor series.
//!
//! Purpose
//! -------
//! House the numerical core of benchmarking: the movement-preservation
//! kernel, the in-place Gram-matrix inversion, and the engine that applies
//! the closed-form constrained correction.
//!
//! Downstream usage
//! ----------------
//! - `crate::reconcile` drives [`benchmark_series`] with intervals built by
//!   `crate::reference` and feeds the outcome into rounding and
//!   diagnostics.
pub mod engine;
pub mod errors;
mod kernel;
mod solver;

pub use engine::{
    benchmark_series, AdjustmentMode, AdjustmentOptions, AdjustmentOutcome, PenaltyOrder,
};
pub use errors::{AdjustmentError, AdjustmentResult};
