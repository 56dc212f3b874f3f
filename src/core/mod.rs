//! Counting core
//!
//! Host-independent: nothing in here knows about Python, C callers or
//! subscriber setup.

pub mod counter;
pub mod trace;

pub use counter::Counter;
pub use trace::{MemorySink, TraceEvent, TraceSink, TracingSink, TRACE_TARGET};

/// Status code returned by `run_counter`.
pub const STATUS_OK: i32 = 0;

/// Build a `Counter`, run it, and report success.
///
/// This is the one operation every host adapter forwards to. It has no
/// failure path and always returns `STATUS_OK`.
pub fn run_counter(max_number: i32, debug_enable: bool) -> i32 {
    let counter = Counter::new(max_number, debug_enable);
    counter.run();
    STATUS_OK
}
