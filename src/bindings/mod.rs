//! Host adapters around `core::run_counter`

pub mod c_api;

#[cfg(feature = "python")]
pub mod python;

pub use c_api::*;

/// Docstring of the `_countlib` Python module
pub const PYTHON_MODULE_DOC: &str = "Native counter extension module.

Keyword arguments are snake_case: run_counter(max_number=10, debug_enable=True)
and Counter(max_number, debug_enable=False, strict=False). Code calling the
camelCase keywords maxNumber= / debugEnable= must be renamed.";
