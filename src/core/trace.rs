//! Trace capability for the counter
//!
//! The counter never writes to a console directly. Every observability line
//! goes through a `TraceSink`, so hosts route lines into `tracing` and tests
//! capture them in memory.

use parking_lot::Mutex;
use std::fmt;

/// Target used for every record the counter emits through `tracing`.
pub const TRACE_TARGET: &str = "countlib::counter";

/// One observability line produced by a `Counter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// Emitted once at construction
    Initialized { max_number: i32 },
    /// Emitted once per loop iteration
    Number(i32),
    /// Emitted after the loop, including when it ran zero times
    Finished,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized { max_number } => {
                write!(f, "Counter initialized with maxNumber = {}", max_number)
            }
            Self::Number(n) => write!(f, "Printed number: {}", n),
            Self::Finished => write!(f, "Counting finished."),
        }
    }
}

/// Destination for trace events.
pub trait TraceSink {
    fn emit(&self, event: &TraceEvent);
}

impl<T: TraceSink + ?Sized> TraceSink for &T {
    fn emit(&self, event: &TraceEvent) {
        (**self).emit(event)
    }
}

/// Forwards events to `tracing` as DEBUG records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&self, event: &TraceEvent) {
        match *event {
            TraceEvent::Initialized { max_number } => {
                tracing::debug!(target: TRACE_TARGET, max_number, "{}", event);
            }
            TraceEvent::Number(number) => {
                tracing::debug!(target: TRACE_TARGET, number, "{}", event);
            }
            TraceEvent::Finished => {
                tracing::debug!(target: TRACE_TARGET, "{}", event);
            }
        }
    }
}

/// Keeps rendered lines in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line emitted so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Drain captured lines, leaving the sink empty
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl TraceSink for MemorySink {
    fn emit(&self, event: &TraceEvent) {
        self.lines.lock().push(event.to_string());
    }
}
