//! countlib - a native counter exposed to Python
//!
//! The counting core is host independent; `bindings` holds the Python (pyo3,
//! behind the `python` feature) and C adapters, `frontend` the command line.

pub mod bindings;
pub mod core;
pub mod errors;
pub mod frontend;
pub mod infrastructure;

// Re-export commonly used items
pub use crate::core::{run_counter, Counter, MemorySink, TraceEvent, TraceSink, TracingSink, STATUS_OK};
pub use errors::CountError;
pub use frontend::Config;
pub use infrastructure::{init_host_logging, init_logging, LogConfig, LogFormat, LogOutput};
