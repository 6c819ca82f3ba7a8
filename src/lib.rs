//! rust_benchmarking — time-series benchmarking and reconciliation with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the benchmarking routines to Python via the `_rust_benchmarking` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing classes and submodules used by the `rust_benchmarking`
//! package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`calendar`, `reference`, `adjustment`,
//!   `rounding`, and `reconcile`) as the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_benchmarking` Python extension.
//! - Create and register Python submodules (`benchmarking`, `rounding`) under
//!   `rust_benchmarking` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner Rust modules; this
//!   file performs only FFI glue, input validation, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible types mirror the
//!   invariants and signatures of their Rust counterparts (e.g.
//!   `ReconcileOutcome`).
//! - On successful conversion from Python objects to Rust types, the
//!   invariants documented in the core modules are assumed to hold.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_rust_benchmarking.<submodule>` and
//!   are typically wrapped by thin pure-Python facades in the top-level
//!   `rust_benchmarking` package.
//! - Period codes, frequency counts, and fiscal-lag conventions follow the
//!   documentation of the underlying Rust modules (`calendar`, `reconcile`).
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `PyErr` values at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on the inner modules and
//!   can ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports the `_rust_benchmarking` module
//!   defined here and wraps its classes in user-facing Python APIs.
//! - External users are expected to interact with either the safe Rust APIs or
//!   the pure-Python wrappers; the PyO3 plumbing is considered internal.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules and
//!   by the end-to-end reconciliation tests under `tests/`.
//! - Smoke tests for the PyO3 bindings verify that classes can be constructed,
//!   called, and round-tripped correctly from Python.

pub mod adjustment;
pub mod calendar;
pub mod reconcile;
pub mod reference;
pub mod rounding;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    reconcile::ReconcileOutcome,
    utils::{extract_algorithm_config, extract_f64_array, extract_frequency_spec, extract_span},
};

/// Reconciliation — Python-facing wrapper for a full benchmarking run.
///
/// Purpose
/// -------
/// Represent the result of reconciling a high-frequency distributor series
/// against lower-frequency benchmarks when called from Python, forwarding all
/// computation to [`reconcile::reconcile`].
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs into contiguous `f64` slices and
///   calendar types.
/// - Run the full pipeline (adjustment, optional controlled rounding, zero
///   overrides, diagnostics) and store the outcome internally.
/// - Expose `adjusted`, `correction`, and `diagnostics` as Python properties.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Reconciliation(distributor, benchmarks, freq, bench_freq, from_period,
/// to_period, ...)`:
/// - `distributor`: `&PyAny`
///   One-dimensional array-like of `f64` indicator values, one per period of
///   the span.
/// - `benchmarks`: `&PyAny`
///   One-dimensional array-like of benchmark totals in chronological order.
///   When `link_to` is given, element 0 carries the link value.
/// - `freq`, `bench_freq`: `i64`
///   Periods per year of the distributor and the benchmarks (1, 4, or 12).
/// - `from_period`, `to_period`: `i64`
///   Span bounds as `year * 100 + period` codes in distributor frequency.
/// - `fiscal_lag`: `Option<i64>`
///   Offset of the benchmark year against the calendar year; defaults to 0.
/// - `link_to`: `Option<i64>`
///   Period code of an anchored link point, if any.
/// - `decimals`: `Option<u32>`
///   When given, controlled rounding to this many decimal places is applied.
/// - `mode`, `penalty`: `Option<&str>`
///   `'additive'`/`'proportional'` and
///   `'first_difference'`/`'second_difference'`.
/// - `update_from`: `Option<i64>`
///   Period code of the caller's resume point, if any.
/// - `index_series`, `stock`, `zero_override`: `Option<bool>`
///   Index-target, stock-series, and exact-zero handling flags.
/// - `weights`: `Option<Vec<f64>>`
///   Optional positive per-period weights, one per distributor point.
///
/// Fields
/// ------
/// - `inner`: [`ReconcileOutcome`]
///   Rust-side container holding the full run outcome used by the accessors.
///
/// Invariants
/// ----------
/// - `inner` is always the outcome of a successfully validated run; failed
///   runs raise a Python exception at construction time instead.
///
/// Performance
/// -----------
/// - At most one allocation per input array is performed to copy Python data
///   into Rust buffers when needed; property access copies the stored vectors.
///
/// Notes
/// -----
/// - This type is primarily intended to be used from Python; native Rust code
///   should prefer calling [`reconcile::reconcile`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_benchmarking.benchmarking")]
pub struct Reconciliation {
    /// The completed run's outcome struct.
    inner: ReconcileOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Reconciliation {
    /// Result of benchmarking a distributor series against benchmark totals.
    ///
    /// The adjusted series honors every covered benchmark total exactly while
    /// minimizing a quadratic movement penalty on the corrections.
    #[new]
    #[pyo3(
        signature = (
            distributor,
            benchmarks,
            freq,
            bench_freq,
            from_period,
            to_period,
            fiscal_lag = None,
            link_to = None,
            decimals = None,
            mode = None,
            penalty = None,
            update_from = None,
            index_series = None,
            stock = None,
            zero_override = None,
            weights = None,
        ),
        text_signature = "(distributor, benchmarks, freq, bench_freq, from_period, to_period, /, \
                          fiscal_lag=0, link_to=None, decimals=None, mode='additive', \
                          penalty='second_difference', update_from=None, index_series=False, \
                          stock=False, zero_override=False, weights=None)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn reconcile<'py>(
        py: Python<'py>, distributor: &Bound<'py, PyAny>, benchmarks: &Bound<'py, PyAny>,
        freq: i64, bench_freq: i64, from_period: i64, to_period: i64, fiscal_lag: Option<i64>,
        link_to: Option<i64>, decimals: Option<u32>, mode: Option<&str>, penalty: Option<&str>,
        update_from: Option<i64>, index_series: Option<bool>, stock: Option<bool>,
        zero_override: Option<bool>, weights: Option<Vec<f64>>,
    ) -> PyResult<Reconciliation> {
        let spec = extract_frequency_spec(freq, bench_freq, fiscal_lag)?;
        let span = extract_span(from_period, to_period, spec.freq)?;
        let config = extract_algorithm_config(
            spec.freq,
            link_to,
            decimals,
            mode,
            penalty,
            update_from,
            index_series,
            stock,
            zero_override,
            weights,
        )?;

        let dist_arr: PyReadonlyArray1<f64> = extract_f64_array(py, distributor)?;
        let dist: &[f64] = dist_arr.as_slice().map_err(|_| {
            PyValueError::new_err("distributor must be a 1-D contiguous float64 array or sequence")
        })?;
        let bench_arr: PyReadonlyArray1<f64> = extract_f64_array(py, benchmarks)?;
        let bench: &[f64] = bench_arr.as_slice().map_err(|_| {
            PyValueError::new_err("benchmarks must be a 1-D contiguous float64 array or sequence")
        })?;

        let outcome = crate::reconcile::reconcile(dist, bench, &spec, span, &config)?;
        Ok(Reconciliation { inner: outcome })
    }

    /// The adjusted series, one value per period of the span.
    #[getter]
    pub fn adjusted(&self) -> Vec<f64> {
        self.inner.adjusted.clone()
    }

    /// The per-period correction: offsets in additive mode, factors in
    /// proportional mode, before any rounding.
    #[getter]
    pub fn correction(&self) -> Vec<f64> {
        self.inner.correction.clone()
    }

    /// Human-readable non-fatal observations, in pipeline order.
    #[getter]
    pub fn diagnostics(&self) -> Vec<String> {
        self.inner.diagnostics.iter().map(|d| d.to_string()).collect()
    }
}

/// Round a series to `decimals` places while preserving its rounded total.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (values, total, decimals, capacity = None),
    text_signature = "(values, total, decimals, /, capacity=300)"
)]
pub fn round_to_sum<'py>(
    py: Python<'py>, values: &Bound<'py, PyAny>, total: f64, decimals: u32,
    capacity: Option<usize>,
) -> PyResult<Vec<f64>> {
    let arr: PyReadonlyArray1<f64> = extract_f64_array(py, values)?;
    let slice: &[f64] = arr.as_slice().map_err(|_| {
        PyValueError::new_err("values must be a 1-D contiguous float64 array or sequence")
    })?;
    let rounded = crate::rounding::round_to_sum(
        slice,
        total,
        decimals,
        capacity.unwrap_or(crate::rounding::DEFAULT_CAPACITY),
    )?;
    Ok(rounded)
}

/// Round a single value half away from zero at `decimals` places.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(value, decimals, /)")]
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    crate::rounding::round_half_away(value, decimals)
}

/// _rust_benchmarking — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_benchmarking` Python module and register its submodules
/// used by the public `rust_benchmarking` package.
///
/// Key behaviors
/// -------------
/// - Create `benchmarking` and `rounding` submodules.
/// - Attach those submodules to the parent `_rust_benchmarking` module.
/// - Register the submodules in `sys.modules` so they are importable via
///   dotted paths from Python.
///
/// Parameters
/// ----------
/// - `_py`: [`Python`]
///   GIL token provided by PyO3 during module initialization.
/// - `m`: `&Bound<PyModule>`
///   Module object representing `_rust_benchmarking`.
///
/// Returns
/// -------
/// `PyResult<()>`
///   `Ok(())` on success, or a Python exception if registration fails.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating submodules or manipulating `sys.modules` fails.
///
/// Panics
/// ------
/// - Never panics under normal operation; all failures are mapped into
///   `PyErr`.
///
/// Notes
/// -----
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_benchmarking<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let benchmarking_mod = PyModule::new(_py, "benchmarking")?;
    let rounding_mod = PyModule::new(_py, "rounding")?;
    benchmarking(_py, m, &benchmarking_mod)?;
    rounding(_py, m, &rounding_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_benchmarking.benchmarking", benchmarking_mod)?;

    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_benchmarking.rounding", rounding_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn benchmarking<'py>(
    _py: Python, rust_benchmarking: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<Reconciliation>()?;
    rust_benchmarking.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn rounding<'py>(
    _py: Python, rust_benchmarking: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(round_to_sum, m)?)?;
    m.add_function(wrap_pyfunction!(round_half_away, m)?)?;
    rust_benchmarking.add_submodule(m)?;
    Ok(())
}
