use numpy::PyReadonlyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Borrow a numpy series as a slice. Requires C-contiguity; `name` is
/// used in the error message.
pub fn series<'py>(arr: &'py PyReadonlyArray1<'py, f64>, name: &str) -> PyResult<&'py [f64]> {
    arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a C-contiguous float64 array"))
    })
}

/// Borrow a fixed-length vector (parameters, state).
pub fn fixed_series<'py>(
    arr: &'py PyReadonlyArray1<'py, f64>,
    len: usize,
    name: &str,
) -> PyResult<&'py [f64]> {
    let slice = series(arr, name)?;
    if slice.len() != len {
        return Err(PyValueError::new_err(format!(
            "{name} must have {len} elements, got {}",
            slice.len()
        )));
    }
    Ok(slice)
}

/// Borrow two series that must be step-aligned.
pub fn aligned_pair<'py>(
    first: &'py PyReadonlyArray1<'py, f64>,
    first_name: &str,
    second: &'py PyReadonlyArray1<'py, f64>,
    second_name: &str,
) -> PyResult<(&'py [f64], &'py [f64])> {
    let a = series(first, first_name)?;
    let b = series(second, second_name)?;
    if a.len() != b.len() {
        return Err(PyValueError::new_err(format!(
            "{first_name} length {} does not match {second_name} length {}",
            a.len(),
            b.len()
        )));
    }
    Ok((a, b))
}
