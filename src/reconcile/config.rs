//! reconcile::config — per-request algorithm configuration.
//!
//! Purpose
//! -------
//! Collect every knob of a reconciliation request in one value with
//! conservative defaults: additive second-difference adjustment, no
//! linkage, no rounding, no update tracking.
use crate::adjustment::{AdjustmentMode, PenaltyOrder};
use crate::calendar::Period;
use crate::rounding::DEFAULT_CAPACITY;

/// Configuration of one reconciliation request.
///
/// Notes
/// -----
/// - `linked` requires `link_to`; `update` requires `update_from`. The
///   orchestrator rejects a flag without its date.
/// - `update_from` is advisory: it drives the update-discontinuity
///   diagnostics and is clamped to just past the link point on linked
///   requests, mirroring how downstream systems resume writing an
///   existing target series.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmConfig {
    /// Anchor the run to a previously adjusted value at `link_to`.
    pub linked: bool,
    /// Period of the link value; `benchmarks[0]` carries the value itself.
    pub link_to: Option<Period>,
    /// Round the adjusted series to this many decimals when set.
    pub rounding: Option<u32>,
    /// Largest rounding window accepted.
    pub rounding_capacity: usize,
    /// Additive or proportional correction.
    pub mode: AdjustmentMode,
    /// Movement-penalty order.
    pub penalty: PenaltyOrder,
    /// Track where the caller intends to resume writing the target.
    pub update: bool,
    /// First period the caller intends to rewrite.
    pub update_from: Option<Period>,
    /// Benchmarks are per-period index levels rather than totals.
    pub index_series: bool,
    /// Benchmarks are point-in-time values.
    pub stock: bool,
    /// Force adjusted values to zero wherever their benchmark is zero.
    pub zero_override: bool,
    /// Optional per-observation weights for the engine.
    pub weights: Option<Vec<f64>>,
}

impl Default for AlgorithmConfig {
    fn default() -> AlgorithmConfig {
        AlgorithmConfig {
            linked: false,
            link_to: None,
            rounding: None,
            rounding_capacity: DEFAULT_CAPACITY,
            mode: AdjustmentMode::Additive,
            penalty: PenaltyOrder::SecondDifference,
            update: false,
            update_from: None,
            index_series: false,
            stock: false,
            zero_override: false,
            weights: None,
        }
    }
}
