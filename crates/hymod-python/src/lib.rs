mod convert;
mod metrics;
mod model;

use pyo3::prelude::*;

#[pyfunction]
fn rust_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(rust_version, m)?)?;
    model::register(m)?;
    metrics::register(m)?;
    Ok(())
}
