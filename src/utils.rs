#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    adjustment::{AdjustmentMode, PenaltyOrder},
    calendar::{Frequency, FrequencySpec, Period, PeriodRange},
    reconcile::AlgorithmConfig,
    rounding::DEFAULT_CAPACITY,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
pub fn extract_frequency_spec(
    freq: i64, bench_freq: i64, fiscal_lag: Option<i64>,
) -> PyResult<FrequencySpec> {
    let freq = Frequency::from_per_year(freq)?;
    let bench_freq = Frequency::from_per_year(bench_freq)?;
    let spec = FrequencySpec::new(freq, bench_freq, fiscal_lag.unwrap_or(0))?;
    Ok(spec)
}

#[cfg(feature = "python-bindings")]
pub fn extract_span(from: i64, to: i64, freq: Frequency) -> PyResult<PeriodRange> {
    let from = Period::from_code(from, freq)?;
    let to = Period::from_code(to, freq)?;
    Ok(PeriodRange { from, to })
}

#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn extract_algorithm_config(
    freq: Frequency, link_to: Option<i64>, decimals: Option<u32>, mode: Option<&str>,
    penalty: Option<&str>, update_from: Option<i64>, index_series: Option<bool>,
    stock: Option<bool>, zero_override: Option<bool>, weights: Option<Vec<f64>>,
) -> PyResult<AlgorithmConfig> {
    let mode_str = mode.unwrap_or("additive").to_lowercase();
    let mode_val = match mode_str.as_str() {
        "additive" => AdjustmentMode::Additive,
        "proportional" => AdjustmentMode::Proportional,
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid mode {:?} (expected 'additive' or 'proportional')",
                other
            )));
        }
    };

    let penalty_str = penalty.unwrap_or("second_difference").to_lowercase();
    let penalty_val = match penalty_str.as_str() {
        "second_difference" | "second" => PenaltyOrder::SecondDifference,
        "first_difference" | "first" => PenaltyOrder::FirstDifference,
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid penalty {:?} (expected 'first_difference' or 'second_difference')",
                other
            )));
        }
    };

    let link_period = match link_to {
        Some(code) => Some(Period::from_code(code, freq)?),
        None => None,
    };
    let update_period = match update_from {
        Some(code) => Some(Period::from_code(code, freq)?),
        None => None,
    };

    Ok(AlgorithmConfig {
        linked: link_period.is_some(),
        link_to: link_period,
        rounding: decimals,
        rounding_capacity: DEFAULT_CAPACITY,
        mode: mode_val,
        penalty: penalty_val,
        update: update_period.is_some(),
        update_from: update_period,
        index_series: index_series.unwrap_or(false),
        stock: stock.unwrap_or(false),
        zero_override: zero_override.unwrap_or(false),
        weights,
    })
}
