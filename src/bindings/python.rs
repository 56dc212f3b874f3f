//! Python bindings (`_countlib` extension module)
//!
//! The pure-Python package in `python/countlib` re-exports everything from
//! here. Keyword arguments are snake_case (`max_number`, `debug_enable`);
//! the camelCase `maxNumber` / `debugEnable` spellings are not accepted.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{run_counter as run_counter_impl, Counter};
use crate::errors::CountError;
use crate::infrastructure::init_host_logging;

impl From<CountError> for PyErr {
    fn from(err: CountError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Run the counter with given parameters. Returns 0.
#[pyfunction]
#[pyo3(signature = (max_number, debug_enable))]
fn run_counter(py: Python<'_>, max_number: i32, debug_enable: bool) -> i32 {
    if debug_enable {
        init_host_logging();
    }
    py.allow_threads(|| run_counter_impl(max_number, debug_enable))
}

/// A counter that counts from 1 up to `max_number`.
#[pyclass(name = "Counter", module = "countlib")]
struct PyCounter {
    inner: Counter,
}

#[pymethods]
impl PyCounter {
    #[new]
    #[pyo3(signature = (max_number, debug_enable = false, strict = false))]
    fn new(max_number: i32, debug_enable: bool, strict: bool) -> PyResult<Self> {
        if debug_enable {
            init_host_logging();
        }
        let inner = if strict {
            Counter::try_new_strict(max_number, debug_enable)?
        } else {
            Counter::new(max_number, debug_enable)
        };
        Ok(Self { inner })
    }

    /// Start counting from 1 to max_number.
    fn start_counting(&self, py: Python<'_>) {
        py.allow_threads(|| self.inner.start_counting())
    }

    #[getter]
    fn max_number(&self) -> i32 {
        self.inner.max_number()
    }

    #[getter]
    fn debug_enable(&self) -> bool {
        self.inner.debug_enable()
    }

    fn __repr__(&self) -> String {
        format!(
            "Counter(max_number={}, debug_enable={})",
            self.inner.max_number(),
            if self.inner.debug_enable() { "True" } else { "False" }
        )
    }
}

#[pymodule]
fn _countlib(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__doc__", super::PYTHON_MODULE_DOC)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(run_counter, m)?)?;
    m.add_class::<PyCounter>()?;
    Ok(())
}
