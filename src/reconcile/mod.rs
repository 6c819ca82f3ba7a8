//! reconcile — request-level orchestration of the benchmarking pipeline.
//!
//! Purpose
//! -------
//! Tie the calendar, reference, adjustment, and rounding stages into one
//! entry point, [`reconcile`], that validates a request, runs the
//! pipeline, and returns the adjusted series with its diagnostics.
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod request;

pub use config::AlgorithmConfig;
pub use diagnostics::Diagnostic;
pub use errors::{ReconcileError, ReconcileResult};
pub use request::{reconcile, ReconcileOutcome};
