//! Integration tests for the benchmarking reconciliation pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: from calendar validation and
//!   reference-interval construction, through the quadratic-minimization
//!   adjustment, to controlled rounding, zero overrides, and diagnostics.
//! - Exercise realistic configurations (frequency pairings, fiscal lags,
//!   link points, stock series, and rounding) rather than toy edge cases
//!   only.
//!
//! Coverage
//! --------
//! - `calendar`:
//!   - `FrequencySpec` construction for quarterly/annual and
//!     monthly/quarterly pairings, with and without a fiscal lag.
//! - `reconcile::reconcile`:
//!   - Flow and stock runs, linked runs, zero overrides, rounding, and
//!     the diagnostics attached to each outcome.
//! - `rounding`:
//!   - Controlled rounding applied through the pipeline so that rounded
//!     windows still hit their benchmark totals exactly.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (interval
//!   arithmetic, matrix inversion, single-value rounding) — these are
//!   covered by unit tests.
//! - Python bindings or user-facing API wrappers — those are expected to
//!   be tested at a higher integration or system level.
//! - Exhaustive stress testing over long spans and weight grids — those
//!   belong in targeted performance and property tests.
use rust_benchmarking::{
    adjustment::AdjustmentMode,
    calendar::{Frequency, FrequencySpec, Period, PeriodRange},
    reconcile::{reconcile, AlgorithmConfig, Diagnostic},
};

/// Purpose
/// -------
/// Build a quarterly-distributor, annual-benchmark `FrequencySpec` with a
/// chosen fiscal lag, panicking on invalid input since that would be a
/// test configuration error rather than behavior under test.
fn quarterly_annual_spec(fiscal_lag: i64) -> FrequencySpec {
    FrequencySpec::new(Frequency::Quarterly, Frequency::Annual, fiscal_lag)
        .expect("quarterly/annual is a supported frequency pairing")
}

/// Purpose
/// -------
/// Build a monthly-distributor, quarterly-benchmark `FrequencySpec` with
/// no fiscal lag.
fn monthly_quarterly_spec() -> FrequencySpec {
    FrequencySpec::new(Frequency::Monthly, Frequency::Quarterly, 0)
        .expect("monthly/quarterly is a supported frequency pairing")
}

/// Purpose
/// -------
/// Build a `PeriodRange` from two `year * 100 + period` codes in the given
/// distributor frequency.
///
/// Parameters
/// ----------
/// - `from`, `to`: Span bounds as period codes; must be valid for `freq`.
/// - `freq`: Distributor frequency the codes are expressed in.
fn span(from: i64, to: i64, freq: Frequency) -> PeriodRange {
    PeriodRange {
        from: Period::from_code(from, freq).expect("valid from code"),
        to: Period::from_code(to, freq).expect("valid to code"),
    }
}

/// Purpose
/// -------
/// Assert that two floating-point values agree to within `tol`, with a
/// readable failure message naming the offending index.
fn assert_close(actual: f64, expected: f64, tol: f64, label: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{label}: expected {expected}, got {actual} (tol {tol})"
    );
}

/// Purpose
/// -------
/// Assert a constrained window sum against its benchmark with a relative
/// tolerance of 1e-6. The near-unit decay rate leaves the Gram matrix of
/// a multi-benchmark solve close to rank one, so residuals around eps
/// times the condition number (1e-8 at these magnitudes) are inherent.
fn assert_benchmark_sum(actual: f64, target: f64, label: &str) {
    assert_close(actual, target, 1e-6 * target.abs().max(1.0), label);
}

#[test]
// Purpose
// -------
// Ensure a plain quarterly-to-annual flow run distributes a single annual
// benchmark across its four quarters, hitting the total exactly and
// staying smooth around an equal-valued input.
//
// Given
// -----
// - Distributor [10, 10, 10, 10] over 2021Q1..2021Q4.
// - One annual benchmark of 44.
// - Additive mode, second-difference penalty, default configuration.
//
// Expect
// ------
// - The run succeeds and the adjusted sum equals 44 to within 1e-9.
// - Each adjusted value is close to 11, since an equal input under a
//   movement penalty takes an equal share of the discrepancy.
// - A `SingleBenchmark` diagnostic is attached, and nothing else.
fn annual_benchmark_distributes_across_equal_quarters() {
    // Arrange
    let spec = quarterly_annual_spec(0);
    let range = span(2021_01, 2021_04, Frequency::Quarterly);
    let distributor = [10.0, 10.0, 10.0, 10.0];
    let benchmarks = [44.0];
    let config = AlgorithmConfig::default();

    // Act
    let outcome = reconcile(&distributor, &benchmarks, &spec, range, &config)
        .expect("a covered annual benchmark should reconcile");

    // Assert
    let total: f64 = outcome.adjusted.iter().sum();
    assert_close(total, 44.0, 1e-9, "adjusted total");
    for (t, &v) in outcome.adjusted.iter().enumerate() {
        assert_close(v, 11.0, 1e-6, &format!("adjusted[{t}]"));
    }
    assert_eq!(outcome.diagnostics, vec![Diagnostic::SingleBenchmark]);
}

#[test]
// Purpose
// -------
// Verify that a multi-year quarterly-to-annual run honors every annual
// total simultaneously while preserving a smooth quarter-to-quarter
// profile across the year boundary.
//
// Given
// -----
// - Distributor [10, 12, 14, 16, 18, 20, 22, 24] over 2021Q1..2022Q4.
// - Annual benchmarks [56, 90] (discrepancies of +4 and +6).
// - Additive mode, second-difference penalty.
//
// Expect
// ------
// - Each annual window sums to its benchmark to a relative 1e-6.
// - The correction changes by less than the full per-year discrepancy
//   between adjacent quarters, confirming the movement penalty spreads
//   the change instead of dumping it at the boundary.
// - No diagnostics are attached.
fn consecutive_annual_benchmarks_are_honored_smoothly() {
    // Arrange
    let spec = quarterly_annual_spec(0);
    let range = span(2021_01, 2022_04, Frequency::Quarterly);
    let distributor = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0];
    let benchmarks = [56.0, 90.0];
    let config = AlgorithmConfig::default();

    // Act
    let outcome = reconcile(&distributor, &benchmarks, &spec, range, &config)
        .expect("two covered annual benchmarks should reconcile");

    // Assert
    let first_year: f64 = outcome.adjusted[..4].iter().sum();
    let second_year: f64 = outcome.adjusted[4..].iter().sum();
    assert_benchmark_sum(first_year, 56.0, "first annual total");
    assert_benchmark_sum(second_year, 90.0, "second annual total");
    for t in 1..outcome.correction.len() {
        let step = (outcome.correction[t] - outcome.correction[t - 1]).abs();
        assert!(step < 4.0, "correction step at {t} should stay below the annual discrepancy");
    }
    assert!(outcome.diagnostics.is_empty());
}

#[test]
// Purpose
// -------
// Confirm that a stock-mode run treats each benchmark as a single-point
// constraint rather than a windowed sum.
//
// Given
// -----
// - Distributor [10, 10, 10, 10] over 2021Q1..2021Q4, stock flag set.
// - One annual stock benchmark of 13, anchored to the fourth quarter by
//   the stock reference rule.
//
// Expect
// ------
// - The adjusted fourth quarter equals 13 to within 1e-9.
// - The adjusted series is monotonically non-decreasing toward the
//   constrained point, since the correction ramps up smoothly from the
//   unconstrained start.
fn stock_benchmark_pins_a_single_point() {
    // Arrange
    let spec = quarterly_annual_spec(0);
    let range = span(2021_01, 2021_04, Frequency::Quarterly);
    let distributor = [10.0, 10.0, 10.0, 10.0];
    let benchmarks = [13.0];
    let config = AlgorithmConfig { stock: true, ..AlgorithmConfig::default() };

    // Act
    let outcome = reconcile(&distributor, &benchmarks, &spec, range, &config)
        .expect("a covered stock benchmark should reconcile");

    // Assert
    assert_close(outcome.adjusted[3], 13.0, 1e-9, "constrained stock point");
    for t in 1..4 {
        assert!(
            outcome.adjusted[t] >= outcome.adjusted[t - 1] - 1e-9,
            "adjusted series should ramp toward the constrained point"
        );
    }
}

#[test]
// Purpose
// -------
// Verify that an anchored link point is held exactly while the covered
// benchmarks are still honored, and that a link value equal to the
// distributor leaves the link period untouched.
//
// Given
// -----
// - Distributor of eight equal 10s over 2021Q1..2022Q4.
// - Link point at 2021Q1 with link value 10 (benchmarks[0]).
// - Annual benchmarks [41, 44] for 2021 and 2022.
//
// Expect
// ------
// - The adjusted link period equals 10 to a relative 1e-6.
// - Each annual window sums to its benchmark to a relative 1e-6.
fn link_point_is_held_while_benchmarks_are_honored() {
    // Arrange
    let spec = quarterly_annual_spec(0);
    let range = span(2021_01, 2022_04, Frequency::Quarterly);
    let distributor = [10.0; 8];
    let benchmarks = [10.0, 41.0, 44.0];
    let link = Period::from_code(2021_01, Frequency::Quarterly).expect("valid link code");
    let config =
        AlgorithmConfig { linked: true, link_to: Some(link), ..AlgorithmConfig::default() };

    // Act
    let outcome = reconcile(&distributor, &benchmarks, &spec, range, &config)
        .expect("a linked run with covered benchmarks should reconcile");

    // Assert
    assert_benchmark_sum(outcome.adjusted[0], 10.0, "anchored link period");
    let first_year: f64 = outcome.adjusted[..4].iter().sum();
    let second_year: f64 = outcome.adjusted[4..].iter().sum();
    assert_benchmark_sum(first_year, 41.0, "first annual total");
    assert_benchmark_sum(second_year, 44.0, "second annual total");
}

#[test]
// Purpose
// -------
// Ensure controlled rounding applied through the pipeline yields values
// at the requested precision whose windows still hit their benchmark
// totals exactly.
//
// Given
// -----
// - Distributor [10, 10, 10, 10] over 2021Q1..2021Q4.
// - One annual benchmark of 43 and rounding to 0 decimals.
//
// Expect
// ------
// - Every adjusted value is an integer.
// - The adjusted values sum to exactly 43, so the rounding redistributed
//   the residual instead of dropping it.
fn rounding_preserves_benchmark_totals_exactly() {
    // Arrange
    let spec = quarterly_annual_spec(0);
    let range = span(2021_01, 2021_04, Frequency::Quarterly);
    let distributor = [10.0, 10.0, 10.0, 10.0];
    let benchmarks = [43.0];
    let config = AlgorithmConfig { rounding: Some(0), ..AlgorithmConfig::default() };

    // Act
    let outcome = reconcile(&distributor, &benchmarks, &spec, range, &config)
        .expect("rounding to whole units should reconcile");

    // Assert
    for (t, &v) in outcome.adjusted.iter().enumerate() {
        assert_close(v, v.round(), 0.0, &format!("adjusted[{t}] integrality"));
    }
    let total: f64 = outcome.adjusted.iter().sum();
    assert_close(total, 43.0, 0.0, "rounded annual total");
}

#[test]
// Purpose
// -------
// Confirm that an exact-zero benchmark combined with the zero override
// forces every adjusted value in that benchmark's covered span to zero,
// overriding the quadratic-minimization result.
//
// Given
// -----
// - Distributor of eight 5s over 2021Q1..2022Q4.
// - Annual benchmarks [22, 0] with the zero override active.
//
// Expect
// ------
// - The first annual window sums to 22 to a relative 1e-6.
// - Every adjusted value in the second annual window is exactly 0.
// - No `NonPositiveDistributor` diagnostic is raised, since the override
//   legitimizes exact zeros and the distributor itself is positive.
fn zero_benchmark_overrides_its_covered_span() {
    // Arrange
    let spec = quarterly_annual_spec(0);
    let range = span(2021_01, 2022_04, Frequency::Quarterly);
    let distributor = [5.0; 8];
    let benchmarks = [22.0, 0.0];
    let config = AlgorithmConfig { zero_override: true, ..AlgorithmConfig::default() };

    // Act
    let outcome = reconcile(&distributor, &benchmarks, &spec, range, &config)
        .expect("a zero benchmark with the override should reconcile");

    // Assert
    let first_year: f64 = outcome.adjusted[..4].iter().sum();
    assert_benchmark_sum(first_year, 22.0, "first annual total");
    for (t, &v) in outcome.adjusted[4..].iter().enumerate() {
        assert_eq!(v, 0.0, "adjusted[{}] should be forced to zero", t + 4);
    }
    assert!(!outcome.diagnostics.contains(&Diagnostic::NonPositiveDistributor));
}

#[test]
// Purpose
// -------
// Exercise the monthly-to-quarterly pairing end to end: four quarterly
// benchmarks over a calendar year of monthly data, in proportional mode.
//
// Given
// -----
// - Distributor of twelve 1.0s over 2021M01..2021M12.
// - Quarterly benchmarks [3.6, 2.4, 3.0, 3.3].
// - Proportional mode, so corrections are reported as factors.
//
// Expect
// ------
// - Each three-month window sums to its quarterly benchmark to a
//   relative 1e-6.
// - Every correction factor is strictly positive, as the benchmarks and
//   the distributor are.
fn monthly_series_honors_quarterly_benchmarks_proportionally() {
    // Arrange
    let spec = monthly_quarterly_spec();
    let range = span(2021_01, 2021_12, Frequency::Monthly);
    let distributor = [1.0; 12];
    let benchmarks = [3.6, 2.4, 3.0, 3.3];
    let config =
        AlgorithmConfig { mode: AdjustmentMode::Proportional, ..AlgorithmConfig::default() };

    // Act
    let outcome = reconcile(&distributor, &benchmarks, &spec, range, &config)
        .expect("a monthly series with quarterly benchmarks should reconcile");

    // Assert
    for (m, &target) in benchmarks.iter().enumerate() {
        let window: f64 = outcome.adjusted[m * 3..(m + 1) * 3].iter().sum();
        assert_benchmark_sum(window, target, &format!("quarterly total {m}"));
    }
    assert!(outcome.correction.iter().all(|&f| f > 0.0));
}

#[test]
// Purpose
// -------
// Verify that a fiscal lag shifts which distributor periods an annual
// benchmark constrains, and that the shifted window still sums to the
// benchmark.
//
// Given
// -----
// - Distributor [10, 10, 10, 10, 20, 20] over 2021Q1..2022Q2.
// - Fiscal lag of 1 quarter, so the 2021 benchmark year covers
//   2021Q2..2022Q1.
// - One annual benchmark of 52.
//
// Expect
// ------
// - The adjusted values at offsets 1..=4 sum to 52 to within 1e-9.
// - The run succeeds without an interval error, confirming the lagged
//   window stays inside the span.
fn fiscal_lag_shifts_the_constrained_window() {
    // Arrange
    let spec = quarterly_annual_spec(1);
    let range = span(2021_01, 2022_02, Frequency::Quarterly);
    let distributor = [10.0, 10.0, 10.0, 10.0, 20.0, 20.0];
    let benchmarks = [52.0];
    let config = AlgorithmConfig::default();

    // Act
    let outcome = reconcile(&distributor, &benchmarks, &spec, range, &config)
        .expect("a lagged annual benchmark inside the span should reconcile");

    // Assert
    let lagged_year: f64 = outcome.adjusted[1..=4].iter().sum();
    assert_close(lagged_year, 52.0, 1e-9, "lagged annual total");
}

#[test]
// Purpose
// -------
// Ensure missing trailing benchmark values are trimmed rather than
// rejected, with the shrunken coverage reported as diagnostics.
//
// Given
// -----
// - Distributor of eight 10s over 2021Q1..2022Q4.
// - Benchmarks [44, NaN]: the 2022 total is not yet available.
//
// Expect
// ------
// - The run succeeds on the 2021 benchmark alone.
// - The first annual window sums to 44 and the uncovered quarters carry
//   the correction extrapolated beyond the last constraint.
// - `TrailingBenchmarkMissing { trimmed: 1 }` and `SingleBenchmark`
//   diagnostics are both attached.
fn missing_trailing_benchmark_is_trimmed_and_reported() {
    // Arrange
    let spec = quarterly_annual_spec(0);
    let range = span(2021_01, 2022_04, Frequency::Quarterly);
    let distributor = [10.0; 8];
    let benchmarks = [44.0, f64::NAN];
    let config = AlgorithmConfig::default();

    // Act
    let outcome = reconcile(&distributor, &benchmarks, &spec, range, &config)
        .expect("a trailing missing benchmark should be trimmed, not rejected");

    // Assert
    let first_year: f64 = outcome.adjusted[..4].iter().sum();
    assert_close(first_year, 44.0, 1e-9, "covered annual total");
    assert!(outcome.diagnostics.contains(&Diagnostic::TrailingBenchmarkMissing { trimmed: 1 }));
    assert!(outcome.diagnostics.contains(&Diagnostic::SingleBenchmark));
}

#[test]
// Purpose
// -------
// Verify the uncovered tail of a rounded run: periods past the last
// benchmark are rounded in windows that reuse the last benchmark
// interval's width, each against its own sum, with a shorter final
// remainder window. A long trimmed tail makes that reuse observable,
// since several full-width windows fit before the remainder.
//
// Given
// -----
// - Distributor of seventeen 1.0s over 2021M01..2022M05.
// - Quarterly benchmarks [3.6, 3.3, 3.3, NaN, NaN]: the last two
//   quarters are not yet available, so eight months go uncovered.
// - Rounding to 0 decimals.
//
// Expect
// ------
// - The three covered quarters round to the rounded benchmarks
//   [4, 3, 3].
// - The tail rounds as two width-3 windows summing to 3 each, then a
//   width-2 remainder summing to 2, so the whole series partitions as
//   [4, 3, 3, 3, 3, 2].
// - Every adjusted value is an integer and
//   `TrailingBenchmarkMissing { trimmed: 2 }` is attached.
fn trimmed_tail_rounds_in_reused_width_windows() {
    // Arrange
    let spec = monthly_quarterly_spec();
    let range = span(2021_01, 2022_05, Frequency::Monthly);
    let distributor = [1.0; 17];
    let benchmarks = [3.6, 3.3, 3.3, f64::NAN, f64::NAN];
    let config = AlgorithmConfig { rounding: Some(0), ..AlgorithmConfig::default() };

    // Act
    let outcome = reconcile(&distributor, &benchmarks, &spec, range, &config)
        .expect("a trimmed tail with rounding should reconcile");

    // Assert
    let bounds = [0usize, 3, 6, 9, 12, 15, 17];
    let expected_sums = [4.0, 3.0, 3.0, 3.0, 3.0, 2.0];
    for (w, &target) in expected_sums.iter().enumerate() {
        let window: f64 = outcome.adjusted[bounds[w]..bounds[w + 1]].iter().sum();
        assert_close(window, target, 0.0, &format!("window {w} rounded sum"));
    }
    for (t, &v) in outcome.adjusted.iter().enumerate() {
        assert_close(v, v.round(), 0.0, &format!("adjusted[{t}] integrality"));
    }
    assert!(outcome.diagnostics.contains(&Diagnostic::TrailingBenchmarkMissing { trimmed: 2 }));
}

#[test]
// Purpose
// -------
// Confirm that a distributor containing non-positive values still
// reconciles but raises the corresponding diagnostic in additive mode.
//
// Given
// -----
// - Distributor [10, 0, 10, 10] over 2021Q1..2021Q4 with one exact zero.
// - One annual benchmark of 36, additive mode, no zero override.
//
// Expect
// ------
// - The run succeeds and the adjusted sum equals 36 to within 1e-9.
// - A `NonPositiveDistributor` diagnostic is attached, since without the
//   override an exact zero counts as non-positive.
fn non_positive_distributor_is_flagged_not_rejected() {
    // Arrange
    let spec = quarterly_annual_spec(0);
    let range = span(2021_01, 2021_04, Frequency::Quarterly);
    let distributor = [10.0, 0.0, 10.0, 10.0];
    let benchmarks = [36.0];
    let config = AlgorithmConfig::default();

    // Act
    let outcome = reconcile(&distributor, &benchmarks, &spec, range, &config)
        .expect("an additive run tolerates a zero distributor value");

    // Assert
    let total: f64 = outcome.adjusted.iter().sum();
    assert_close(total, 36.0, 1e-9, "adjusted total");
    assert!(outcome.diagnostics.contains(&Diagnostic::NonPositiveDistributor));
}
