//! rounding::series — windowed rounding of an adjusted series.
//!
//! Purpose
//! -------
//! Round a benchmarked series in place: every benchmark interval is
//! rounded against its benchmark value, the leading stub before the first
//! benchmark against its own sum, and the periods past the last benchmark
//! in windows of the last benchmark's width, each against its own sum.
//!
//! Invariants & assumptions
//! ------------------------
//! - Benchmarked windows keep the constraint invariant at the rounded
//!   precision: each rounded interval totals its rounded benchmark.
//! - Uncovered windows are self-targeted, so rounding never moves their
//!   total by more than half a unit of the last kept digit.
//! - The link interval of a linked request is skipped entirely; its value
//!   comes from an earlier run and is already rounded.
use crate::reference::ReferenceIntervals;
use crate::rounding::errors::{RoundingError, RoundingResult};
use crate::rounding::round::round_to_sum;

/// Round `series` in place against its benchmark windows.
///
/// Parameters
/// ----------
/// - `series`: `&mut [f64]`
///   Adjusted series, modified in place.
/// - `benchmarks`: `&[f64]`
///   One value per reference interval, link point included when linked.
/// - `intervals`: `&`[`ReferenceIntervals`]
///   Reference intervals over `series`, 1-based inclusive.
/// - `linked`: `bool`
///   Whether interval 0 is a link point to skip.
/// - `decimals`: `u32`
///   Number of decimal places kept.
/// - `capacity`: `usize`
///   Largest admissible rounding window.
///
/// Errors
/// ------
/// - `RoundingError::BenchmarkCountMismatch` when `benchmarks` holds
///   fewer values than `intervals`; nothing is modified in that case.
/// - Any other [`crate::rounding::RoundingError`] from a window; `series`
///   keeps the windows already rounded before the failure.
pub fn round_series_to_benchmarks(
    series: &mut [f64],
    benchmarks: &[f64],
    intervals: &ReferenceIntervals,
    linked: bool,
    decimals: u32,
    capacity: usize,
) -> RoundingResult<()> {
    if benchmarks.len() < intervals.len() {
        return Err(RoundingError::BenchmarkCountMismatch {
            benchmarks: benchmarks.len(),
            intervals: intervals.len(),
        });
    }
    let first = usize::from(linked);
    if intervals.len() <= first {
        return Ok(());
    }

    // Windows covered by benchmarks.
    for m in first..intervals.len() {
        let (tau, kappa) = intervals.window(m);
        let window = (tau - 1) as usize..kappa as usize;
        let rounded = round_to_sum(&series[window.clone()], benchmarks[m], decimals, capacity)?;
        series[window].copy_from_slice(&rounded);
    }

    let (first_tau, _) = intervals.window(first);
    let width = intervals.last_width() as usize;

    // Leading stub before the first benchmark, rounded to its own sum.
    let lead = first_tau as usize - 1;
    let stub = lead % width;
    if stub != 0 {
        let window = first..first + stub;
        let sum: f64 = series[window.clone()].iter().sum();
        let rounded = round_to_sum(&series[window.clone()], sum, decimals, capacity)?;
        series[window].copy_from_slice(&rounded);
    }

    // Trailing windows past the last benchmark, each rounded to its own
    // sum, reusing the last benchmark's width.
    let (_, last_kappa) = intervals.window(intervals.len() - 1);
    let mut start = last_kappa as usize;
    while start < series.len() {
        let end = usize::min(start + width, series.len());
        let window = start..end;
        let sum: f64 = series[window.clone()].iter().sum();
        let rounded = round_to_sum(&series[window.clone()], sum, decimals, capacity)?;
        series[window].copy_from_slice(&rounded);
        start = end;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{benchmark_window, Frequency, FrequencySpec, Period, PeriodRange};
    use crate::rounding::round::DEFAULT_CAPACITY;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Benchmark windows rounding to their benchmark values.
    // - The leading stub and trailing windows rounding to their own sums.
    // - The linked skip of interval 0.
    // - Rejection of a benchmark slice shorter than the interval table.
    // -------------------------------------------------------------------------

    fn intervals(from: i64, to: i64, linked_to: Option<i64>) -> ReferenceIntervals {
        let spec = FrequencySpec::new(Frequency::Quarterly, Frequency::Annual, 0).unwrap();
        let range = PeriodRange {
            from: Period::from_code(from, Frequency::Quarterly).unwrap(),
            to: Period::from_code(to, Frequency::Quarterly).unwrap(),
        };
        let window = benchmark_window(range, &spec, false);
        let link = linked_to.map(|code| Period::from_code(code, Frequency::Quarterly).unwrap());
        ReferenceIntervals::build(range, window, &spec, link, false)
    }

    #[test]
    // Purpose
    // -------
    // Verify that a covered window rounds to its benchmark and a
    // trailing window rounds to its own sum.
    //
    // Given
    // -----
    // - Six quarters, one annual benchmark 44 over the first four, zero
    //   decimals.
    //
    // Expect
    // ------
    // - The first four values sum to 44; the last two sum to their own
    //   rounded sum.
    fn covered_and_trailing_windows_round_consistently() {
        // Arrange
        let mut series = [10.8, 11.2, 10.9, 11.1, 10.4, 10.4];
        let iv = intervals(202001, 202102, None);

        // Act
        round_series_to_benchmarks(&mut series, &[44.0], &iv, false, 0, DEFAULT_CAPACITY)
            .unwrap();

        // Assert
        let covered: f64 = series[..4].iter().sum();
        assert_eq!(covered, 44.0);
        let trailing: f64 = series[4..].iter().sum();
        assert_eq!(trailing, 21.0, "10.4 + 10.4 rounds to its own sum 21");
        for value in &series {
            assert_eq!(value.fract(), 0.0, "value {value} should be integral");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the leading stub: values before the first benchmark are
    // rounded against their own sum.
    //
    // Given
    // -----
    // - Six quarters starting mid-year with one annual benchmark over
    //   the last four, zero decimals.
    //
    // Expect
    // ------
    // - The two leading values keep their summed total after rounding.
    fn leading_stub_rounds_to_own_sum() {
        // Arrange
        let mut series = [5.6, 5.6, 10.8, 11.2, 10.9, 11.1];
        let iv = intervals(202003, 202104, None);
        assert_eq!(iv.tau(), &[3]);

        // Act
        round_series_to_benchmarks(&mut series, &[44.0], &iv, false, 0, DEFAULT_CAPACITY)
            .unwrap();

        // Assert
        let stub: f64 = series[..2].iter().sum();
        assert_eq!(stub, 11.0, "5.6 + 5.6 rounds to its own sum 11");
        let covered: f64 = series[2..].iter().sum();
        assert_eq!(covered, 44.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the linked skip: interval 0 is left untouched and only the
    // real benchmark windows are rounded.
    //
    // Given
    // -----
    // - Four quarters linked at the first, one annual benchmark 44,
    //   zero decimals. The link value occupies `benchmarks[0]`.
    //
    // Expect
    // ------
    // - The year still sums to 44; the series stays integral.
    fn linked_interval_is_skipped() {
        // Arrange
        let mut series = [10.8, 11.2, 10.9, 11.1];
        let iv = intervals(202001, 202004, Some(202001));
        assert_eq!(iv.len(), 2);

        // Act
        round_series_to_benchmarks(&mut series, &[10.8, 44.0], &iv, true, 0, DEFAULT_CAPACITY)
            .unwrap();

        // Assert
        let covered: f64 = series.iter().sum();
        assert_eq!(covered, 44.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the early return when only the link interval exists.
    //
    // Given
    // -----
    // - A linked interval set with no real benchmark.
    //
    // Expect
    // ------
    // - The series is returned unchanged.
    fn link_only_interval_set_is_a_no_op() {
        // Arrange
        let mut iv = intervals(202001, 202004, Some(202001));
        iv.remove(1);
        let mut series = [10.8, 11.2, 10.9, 11.1];
        let before = series;

        // Act
        round_series_to_benchmarks(&mut series, &[10.8], &iv, true, 0, DEFAULT_CAPACITY)
            .unwrap();

        // Assert
        assert_eq!(series, before);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a benchmark slice shorter than the interval table is
    // rejected up front instead of indexing out of bounds, leaving the
    // series untouched.
    //
    // Given
    // -----
    // - Two annual intervals but a single benchmark value.
    //
    // Expect
    // ------
    // - `RoundingError::BenchmarkCountMismatch { benchmarks: 1,
    //   intervals: 2 }` and an unchanged series.
    fn short_benchmark_slice_is_rejected_up_front() {
        // Arrange
        let mut series = [10.8, 11.2, 10.9, 11.1, 10.4, 10.6, 10.5, 10.7];
        let before = series;
        let iv = intervals(202001, 202104, None);
        assert_eq!(iv.len(), 2);

        // Act
        let err = round_series_to_benchmarks(&mut series, &[44.0], &iv, false, 0, DEFAULT_CAPACITY)
            .unwrap_err();

        // Assert
        assert_eq!(err, RoundingError::BenchmarkCountMismatch { benchmarks: 1, intervals: 2 });
        assert_eq!(series, before);
    }
}
