use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::convert::{aligned_pair, fixed_series};

use hymod_core::errors::ModelError;
use hymod_core::et::EtParams;
use hymod_core::forcing::{ForcingConfig, Resolution};
use hymod_core::output::NullSink;
use hymod_core::params::Parameters;
use hymod_core::realization::LumpedRealization;
use hymod_core::run;
use hymod_core::state::State;
use hymod_core::traits::ModelParams;

fn model_err(err: ModelError) -> PyErr {
    match err {
        ModelError::NoPriorState(t) => PyKeyError::new_err(format!("no state for time step {t}")),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn params_from(arr: &PyReadonlyArray1<'_, f64>) -> PyResult<Parameters> {
    let slice = fixed_series(arr, 6, "params")?;
    <Parameters as ModelParams>::from_array(slice).map_err(PyValueError::new_err)
}

fn fluxes_dict<'py>(
    py: Python<'py>,
    ts: &hymod_core::fluxes::FluxesTimeseries,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("precip", PyArray1::from_slice(py, &ts.precip))?;
    dict.set_item("excess", PyArray1::from_slice(py, &ts.excess))?;
    dict.set_item("actual_et", PyArray1::from_slice(py, &ts.actual_et))?;
    dict.set_item("soil_storage", PyArray1::from_slice(py, &ts.soil_storage))?;
    dict.set_item("quick_flow", PyArray1::from_slice(py, &ts.quick_flow))?;
    dict.set_item("slow_flow", PyArray1::from_slice(py, &ts.slow_flow))?;
    dict.set_item("streamflow", PyArray1::from_slice(py, &ts.streamflow))?;
    Ok(dict)
}

/// Run the kernel over precip/PET arrays. `params` is
/// [max_storage, a, b, ks, kq, n]; the optional initial state is
/// [storage, quick_0, .., quick_{n-1}, slow].
#[pyfunction]
#[pyo3(signature = (params, precip, pet, initial_state=None))]
fn hymod_run<'py>(
    py: Python<'py>,
    params: PyReadonlyArray1<'py, f64>,
    precip: PyReadonlyArray1<'py, f64>,
    pet: PyReadonlyArray1<'py, f64>,
    initial_state: Option<PyReadonlyArray1<'py, f64>>,
) -> PyResult<Bound<'py, PyDict>> {
    let p = params_from(&params)?;
    let (precip_slice, pet_slice) = aligned_pair(&precip, "precip", &pet, "pet")?;

    let state: Option<State> = match &initial_state {
        Some(arr) => {
            let slice = fixed_series(arr, 1 + p.n_levels(), "initial_state")?;
            Some(hymod_core::traits::ModelState::from_slice(slice).map_err(PyValueError::new_err)?)
        }
        None => None,
    };

    let result = run::run(&p, precip_slice, pet_slice, state.as_ref()).map_err(model_err)?;
    fluxes_dict(py, &result)
}

/// Execute one kernel step. Returns (new_state, fluxes_dict).
#[pyfunction]
fn hymod_step<'py>(
    py: Python<'py>,
    state: PyReadonlyArray1<'py, f64>,
    params: PyReadonlyArray1<'py, f64>,
    precip: f64,
    pet: f64,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyDict>)> {
    let p = params_from(&params)?;
    let s_slice = fixed_series(&state, 1 + p.n_levels(), "state")?;
    let s: State =
        hymod_core::traits::ModelState::from_slice(s_slice).map_err(PyValueError::new_err)?;

    let (new_state, fluxes) =
        run::step(&s, &p, precip, &EtParams::Potential { pet }).map_err(model_err)?;

    let state_arr = PyArray1::from_vec(py, hymod_core::traits::ModelState::to_vec(&new_state));

    let dict = PyDict::new(py);
    dict.set_item("precip", fluxes.precip)?;
    dict.set_item("excess", fluxes.excess)?;
    dict.set_item("actual_et", fluxes.actual_et)?;
    dict.set_item("soil_storage", fluxes.soil_storage)?;
    dict.set_item("quick_flow", fluxes.quick_flow)?;
    dict.set_item("slow_flow", fluxes.slow_flow)?;
    dict.set_item("streamflow", fluxes.streamflow)?;
    Ok((state_arr, dict))
}

/// Stateful per-timestep catchment realization.
#[pyclass]
pub struct Realization {
    inner: LumpedRealization,
}

#[pymethods]
impl Realization {
    #[new]
    #[pyo3(signature = (params, initial_storage, initial_levels, initial_time=0, source="forcing"))]
    fn new(
        params: PyReadonlyArray1<'_, f64>,
        initial_storage: f64,
        initial_levels: PyReadonlyArray1<'_, f64>,
        initial_time: i64,
        source: &str,
    ) -> PyResult<Self> {
        let p = params_from(&params)?;
        let levels = fixed_series(&initial_levels, p.n_levels(), "initial_levels")?;
        let forcing = ForcingConfig::new(source, Resolution::Daily, initial_time, i64::MAX)
            .map_err(PyValueError::new_err)?;

        let inner = LumpedRealization::from_parts(
            forcing,
            Box::new(NullSink),
            p,
            initial_storage,
            levels,
            initial_time,
        )
        .map_err(model_err)?;
        Ok(Self { inner })
    }

    /// Compute total discharge for step `t` from the state at `t - dt`,
    /// with an externally computed potential ET demand.
    fn get_response(&mut self, input_flux: f64, t: i64, dt: i64, pet: f64) -> PyResult<f64> {
        self.inner
            .get_response(input_flux, t, dt, &EtParams::Potential { pet })
            .map_err(model_err)
    }

    /// Storage-limited ET extraction for a given soil moisture.
    fn calc_et(&self, soil_moisture: f64, pet: f64) -> f64 {
        self.inner.calc_et(soil_moisture, &EtParams::Potential { pet })
    }

    /// Pre-allocate level storage for `n` further steps starting at `t`.
    fn add_time(&mut self, t: i64, n: usize) -> PyResult<()> {
        self.inner.add_time(t, n).map_err(model_err)
    }

    /// Allow re-simulating already-recorded steps.
    fn set_replay(&mut self, enabled: bool) {
        self.inner.set_replay(enabled);
    }

    /// Recorded [storage, levels...] for `t`.
    fn state_at<'py>(&self, py: Python<'py>, t: i64) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let (storage, levels) = self
            .inner
            .state_at(t)
            .ok_or_else(|| PyKeyError::new_err(format!("no state for time step {t}")))?;
        let mut arr = Vec::with_capacity(1 + levels.len());
        arr.push(storage);
        arr.extend_from_slice(levels);
        Ok(PyArray1::from_vec(py, arr))
    }

    /// Recorded fluxes for `t` as a dict.
    fn fluxes_at<'py>(&self, py: Python<'py>, t: i64) -> PyResult<Bound<'py, PyDict>> {
        let fluxes = self
            .inner
            .fluxes_at(t)
            .ok_or_else(|| PyKeyError::new_err(format!("no fluxes for time step {t}")))?;
        let dict = PyDict::new(py);
        dict.set_item("precip", fluxes.precip)?;
        dict.set_item("excess", fluxes.excess)?;
        dict.set_item("actual_et", fluxes.actual_et)?;
        dict.set_item("soil_storage", fluxes.soil_storage)?;
        dict.set_item("quick_flow", fluxes.quick_flow)?;
        dict.set_item("slow_flow", fluxes.slow_flow)?;
        dict.set_item("streamflow", fluxes.streamflow)?;
        Ok(dict)
    }

    /// Independent copy: duplicated level storage, same recorded history.
    fn copy(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    parent.add_function(wrap_pyfunction!(hymod_run, parent)?)?;
    parent.add_function(wrap_pyfunction!(hymod_step, parent)?)?;
    parent.add_class::<Realization>()?;
    Ok(())
}
