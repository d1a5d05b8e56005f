//! Python bindings for the sandpro stress transform.
//!
//! This crate provides PyO3 bindings exposing sandpro-core functionality to Python.
//! The bindings follow a minimal wrapper pattern - all arithmetic stays in Rust.

use numpy::{PyArray1, PyArray2, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::collections::HashMap;

use sandpro_core::batch::{sweep_orientations, transform_batch as core_transform_batch, OrientationSweep};
use sandpro_core::params;
use sandpro_core::report::format_table;
use sandpro_core::types::{PrincipalStresses, StressInput, StressTensorResult};
use sandpro_core::{transform as core_transform, Error as CoreError};

fn to_py_err(err: CoreError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Principal stresses and well orientation.
#[pyclass(name = "StressInput")]
#[derive(Clone)]
pub struct PyStressInput {
    inner: StressInput,
}

#[pymethods]
impl PyStressInput {
    /// Create a stress input.
    ///
    /// Args:
    ///     sigma_h: Minimum horizontal stress (Psi)
    ///     sigma_H: Maximum horizontal stress (Psi)
    ///     sigma_v: Vertical stress (Psi)
    ///     azimuth: Well azimuth from sigma_H (degrees)
    ///     inclination: Well inclination from vertical (degrees)
    #[new]
    #[allow(non_snake_case)]
    fn new(sigma_h: f64, sigma_H: f64, sigma_v: f64, azimuth: f64, inclination: f64) -> PyResult<Self> {
        let inner = StressInput::new(sigma_h, sigma_H, sigma_v, azimuth, inclination);
        inner.ensure_finite().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn sigma_h(&self) -> f64 {
        self.inner.sigma_h
    }

    #[getter(sigma_H)]
    fn sigma_hmax(&self) -> f64 {
        self.inner.sigma_hmax
    }

    #[getter]
    fn sigma_v(&self) -> f64 {
        self.inner.sigma_v
    }

    #[getter]
    fn azimuth(&self) -> f64 {
        self.inner.azimuth_deg
    }

    #[getter]
    fn inclination(&self) -> f64 {
        self.inner.inclination_deg
    }

    fn __repr__(&self) -> String {
        format!(
            "StressInput(sigma_h={:.1}, sigma_H={:.1}, sigma_v={:.1}, azimuth={:.2}, inclination={:.2})",
            self.inner.sigma_h,
            self.inner.sigma_hmax,
            self.inner.sigma_v,
            self.inner.azimuth_deg,
            self.inner.inclination_deg
        )
    }
}

/// Borehole-frame stress tensor.
#[pyclass(name = "StressResult")]
#[derive(Clone)]
pub struct PyStressResult {
    inner: StressTensorResult,
}

#[pymethods]
impl PyStressResult {
    #[getter]
    fn sigma_xx(&self) -> f64 {
        self.inner.sigma_xx
    }

    #[getter]
    fn sigma_yy(&self) -> f64 {
        self.inner.sigma_yy
    }

    #[getter]
    fn sigma_zz(&self) -> f64 {
        self.inner.sigma_zz
    }

    #[getter]
    fn tau_xy(&self) -> f64 {
        self.inner.tau_xy
    }

    #[getter]
    fn tau_yz(&self) -> f64 {
        self.inner.tau_yz
    }

    #[getter]
    fn tau_xz(&self) -> f64 {
        self.inner.tau_xz
    }

    /// Components in Voigt order: [sigma_xx, sigma_yy, sigma_zz, tau_xy, tau_yz, tau_xz]
    fn voigt<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_vec(py, self.inner.voigt().to_vec())
    }

    /// Full symmetric 3x3 stress matrix.
    fn matrix<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let m = self.inner.to_matrix();
        let data: Vec<Vec<f64>> = (0..3)
            .map(|i| (0..3).map(|j| m[(i, j)]).collect())
            .collect();
        PyArray2::from_vec2(py, &data)
            .map_err(|e| PyRuntimeError::new_err(format!("Failed to create array: {}", e)))
    }

    fn von_mises(&self) -> f64 {
        self.inner.von_mises()
    }

    fn mean_stress(&self) -> f64 {
        self.inner.mean_stress()
    }

    /// Principal values, largest first.
    fn principal_values(&self) -> Vec<f64> {
        self.inner.principal_values().to_vec()
    }

    /// Fixed-precision text table, one component per line.
    #[pyo3(signature = (precision=2))]
    fn format(&self, precision: usize) -> String {
        format_table(&self.inner, precision)
    }

    /// Convert to dictionary keyed by component name.
    fn to_dict(&self) -> HashMap<String, f64> {
        StressTensorResult::COMPONENTS
            .iter()
            .zip(self.inner.voigt())
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "StressResult(sigma_xx={:.2}, sigma_yy={:.2}, sigma_zz={:.2}, tau_xy={:.2}, tau_yz={:.2}, tau_xz={:.2})",
            self.inner.sigma_xx,
            self.inner.sigma_yy,
            self.inner.sigma_zz,
            self.inner.tau_xy,
            self.inner.tau_yz,
            self.inner.tau_xz
        )
    }
}

/// Transform principal stresses into the borehole frame.
#[pyfunction]
fn transform(input: &PyStressInput) -> PyResult<PyStressResult> {
    core_transform(&input.inner)
        .map(|inner| PyStressResult { inner })
        .map_err(to_py_err)
}

/// Transform many inputs at once.
///
/// Args:
///     inputs: Nx5 array with columns (sigma_h, sigma_H, sigma_v, azimuth, inclination)
///
/// Returns:
///     Nx6 array in Voigt order: [sigma_xx, sigma_yy, sigma_zz, tau_xy, tau_yz, tau_xz]
#[pyfunction]
fn transform_batch<'py>(
    py: Python<'py>,
    inputs: PyReadonlyArray2<f64>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let shape = inputs.shape();
    if shape.len() != 2 || shape[1] != 5 {
        return Err(PyValueError::new_err(
            "inputs must be Nx5 array with columns (sigma_h, sigma_H, sigma_v, azimuth, inclination)",
        ));
    }

    let array = inputs.as_array();
    let rows: Vec<StressInput> = (0..shape[0])
        .map(|i| {
            StressInput::new(
                array[[i, 0]],
                array[[i, 1]],
                array[[i, 2]],
                array[[i, 3]],
                array[[i, 4]],
            )
        })
        .collect();

    let results = py.allow_threads(|| core_transform_batch(&rows));

    let mut data = Vec::with_capacity(results.len());
    for (row, result) in results.into_iter().enumerate() {
        let stress = result.map_err(|e| PyValueError::new_err(format!("row {}: {}", row, e)))?;
        data.push(stress.voigt().to_vec());
    }

    if data.is_empty() {
        return Ok(PyArray2::zeros(py, [0, 6], false));
    }
    PyArray2::from_vec2(py, &data)
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to create array: {}", e)))
}

/// Evaluate the transform over a grid of well orientations.
///
/// Returns:
///     Mx8 array with columns (azimuth, inclination, sigma_xx, sigma_yy, sigma_zz,
///     tau_xy, tau_yz, tau_xz), ordered by inclination then azimuth
#[pyfunction]
#[pyo3(signature = (sigma_h, sigma_H, sigma_v, azimuth_step=15.0, inclination_step=15.0, max_inclination=90.0))]
#[allow(non_snake_case)]
fn sweep<'py>(
    py: Python<'py>,
    sigma_h: f64,
    sigma_H: f64,
    sigma_v: f64,
    azimuth_step: f64,
    inclination_step: f64,
    max_inclination: f64,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let principal = PrincipalStresses::new(sigma_h, sigma_H, sigma_v);
    let grid = OrientationSweep {
        azimuth_step_deg: azimuth_step,
        inclination_step_deg: inclination_step,
        max_inclination_deg: max_inclination,
    };
    let samples = py
        .allow_threads(|| sweep_orientations(&principal, &grid))
        .map_err(to_py_err)?;

    let data: Vec<Vec<f64>> = samples
        .iter()
        .map(|s| {
            let mut row = vec![s.azimuth_deg, s.inclination_deg];
            row.extend_from_slice(&s.stress.voigt());
            row
        })
        .collect();
    PyArray2::from_vec2(py, &data)
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to create array: {}", e)))
}

/// List the parameter registry.
///
/// Returns:
///     List of (key, group, display_name, unit) tuples in display order
#[pyfunction]
fn parameters() -> Vec<(&'static str, &'static str, &'static str, &'static str)> {
    params::PARAMETERS
        .iter()
        .map(|p| (p.key, p.group, p.display_name, p.unit.label()))
        .collect()
}

/// Check a value against the registry rule for its parameter.
///
/// Returns:
///     (True, "Valid") or (False, reason). Unknown keys raise ValueError.
#[pyfunction]
fn validate_parameter(key: &str, value: f64) -> PyResult<(bool, String)> {
    match params::validate(key, value) {
        Ok(()) => Ok((true, "Valid".to_string())),
        Err(CoreError::OutOfRange { message, .. }) => Ok((false, message)),
        Err(e @ CoreError::InvalidInput { .. }) => Ok((false, e.to_string())),
        Err(e) => Err(to_py_err(e)),
    }
}

/// Get library version.
#[pyfunction]
fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Python module definition.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyStressInput>()?;
    m.add_class::<PyStressResult>()?;
    m.add_function(wrap_pyfunction!(transform, m)?)?;
    m.add_function(wrap_pyfunction!(transform_batch, m)?)?;
    m.add_function(wrap_pyfunction!(sweep, m)?)?;
    m.add_function(wrap_pyfunction!(parameters, m)?)?;
    m.add_function(wrap_pyfunction!(validate_parameter, m)?)?;
    m.add_function(wrap_pyfunction!(version, m)?)?;
    Ok(())
}
