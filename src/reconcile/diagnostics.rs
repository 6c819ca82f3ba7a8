//! reconcile::diagnostics — non-fatal observations of a completed run.
//!
//! Purpose
//! -------
//! Name the recoverable conditions a reconciliation can detect. They are
//! returned on the outcome rather than raised, since the caller still has
//! a usable adjusted series and must decide how to act on each.
use crate::calendar::Period;

/// Diagnostic — a non-fatal observation attached to a reconciliation
/// outcome.
///
/// Variants
/// --------
/// - `LinkDiscontinuity { expected, link_to }`
///   The link point does not sit immediately before the first covered
///   benchmark period; the anchored continuity has a gap.
/// - `UpdateDiscontinuity { expected, update_from }`
///   The caller's resume point differs from the first period the covered
///   benchmarks constrain.
/// - `MovementDiscontinuity { from, to }`
///   Consequence of either discontinuity on a flow series: the
///   period-to-period movement between the two named periods is not
///   protected by the adjustment.
/// - `NegativeAdjustedValues`
///   The adjusted series contains at least one negative value.
/// - `NonPositiveDistributor`
///   The distributor contains a value at or below zero (strictly below
///   when the zero override is active, which legitimizes exact zeros).
/// - `SingleBenchmark`
///   Only one benchmark period is covered; the adjustment has a single
///   constraint to work with.
/// - `TrailingBenchmarkMissing { trimmed }`
///   Missing values were dropped from the tail of the benchmark input
///   and the covered window shrank by `trimmed` periods.
/// - `LinkPointCollision`
///   A stock link point coincided with the first benchmark; the two
///   constraints were merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    LinkDiscontinuity { expected: Period, link_to: Period },
    UpdateDiscontinuity { expected: Period, update_from: Period },
    MovementDiscontinuity { from: Period, to: Period },
    NegativeAdjustedValues,
    NonPositiveDistributor,
    SingleBenchmark,
    TrailingBenchmarkMissing { trimmed: usize },
    LinkPointCollision,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::LinkDiscontinuity { expected, link_to } => write!(
                f,
                "link point {} does not precede the first covered benchmark \
                 period (expected {})",
                link_to.code(),
                expected.code()
            ),
            Diagnostic::UpdateDiscontinuity { expected, update_from } => write!(
                f,
                "update point {} differs from the first period the covered \
                 benchmarks constrain (expected {})",
                update_from.code(),
                expected.code()
            ),
            Diagnostic::MovementDiscontinuity { from, to } => write!(
                f,
                "period-to-period movement between {} and {} is not protected \
                 by the adjustment",
                from.code(),
                to.code()
            ),
            Diagnostic::NegativeAdjustedValues => {
                write!(f, "adjusted series contains negative values")
            }
            Diagnostic::NonPositiveDistributor => {
                write!(f, "distributor series contains non-positive values")
            }
            Diagnostic::SingleBenchmark => {
                write!(f, "only one benchmark period is covered by the span")
            }
            Diagnostic::TrailingBenchmarkMissing { trimmed } => write!(
                f,
                "{trimmed} missing trailing benchmark value(s) were dropped and \
                 the covered window shrank accordingly"
            ),
            Diagnostic::LinkPointCollision => {
                write!(f, "stock link point coincided with the first benchmark; \
                 the two constraints were merged")
            }
        }
    }
}
