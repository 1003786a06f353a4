use numpy::PyReadonlyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::convert::aligned_pair;
use hymod_core::metrics;

fn paired<'py>(
    observed: &'py PyReadonlyArray1<'py, f64>,
    simulated: &'py PyReadonlyArray1<'py, f64>,
) -> PyResult<(&'py [f64], &'py [f64])> {
    let (obs, sim) = aligned_pair(observed, "observed", simulated, "simulated")?;
    if obs.is_empty() {
        return Err(PyValueError::new_err("metric inputs are empty"));
    }
    Ok((obs, sim))
}

#[pyfunction]
fn nse(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let (obs, sim) = paired(&observed, &simulated)?;
    Ok(metrics::nse(obs, sim))
}

#[pyfunction]
fn kge(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let (obs, sim) = paired(&observed, &simulated)?;
    Ok(metrics::kge(obs, sim))
}

#[pyfunction]
fn rmse(
    observed: PyReadonlyArray1<'_, f64>,
    simulated: PyReadonlyArray1<'_, f64>,
) -> PyResult<f64> {
    let (obs, sim) = paired(&observed, &simulated)?;
    Ok(metrics::rmse(obs, sim))
}

#[pyfunction]
fn mae(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let (obs, sim) = paired(&observed, &simulated)?;
    Ok(metrics::mae(obs, sim))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    parent.add_function(wrap_pyfunction!(nse, parent)?)?;
    parent.add_function(wrap_pyfunction!(kge, parent)?)?;
    parent.add_function(wrap_pyfunction!(rmse, parent)?)?;
    parent.add_function(wrap_pyfunction!(mae, parent)?)?;
    Ok(())
}
