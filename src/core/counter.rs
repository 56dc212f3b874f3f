use crate::core::trace::{TraceEvent, TraceSink, TracingSink};
use crate::errors::CountError;

/// Counts from 1 up to `max_number`, optionally tracing every step.
///
/// The bound and the debug flag are fixed at construction. A bound below 1
/// is accepted and simply yields no iterations.
#[derive(Debug, Clone)]
pub struct Counter<S: TraceSink = TracingSink> {
    max_number: i32,
    debug_enable: bool,
    sink: S,
}

impl Counter<TracingSink> {
    pub fn new(max_number: i32, debug_enable: bool) -> Self {
        Self::with_sink(max_number, debug_enable, TracingSink)
    }

    /// Like `new`, but rejects negative bounds.
    pub fn try_new_strict(max_number: i32, debug_enable: bool) -> Result<Self, CountError> {
        if max_number < 0 {
            return Err(CountError::NegativeBound { max_number });
        }
        Ok(Self::new(max_number, debug_enable))
    }
}

impl<S: TraceSink> Counter<S> {
    pub fn with_sink(max_number: i32, debug_enable: bool, sink: S) -> Self {
        let counter = Self { max_number, debug_enable, sink };
        counter.trace(TraceEvent::Initialized { max_number });
        counter
    }

    pub fn max_number(&self) -> i32 {
        self.max_number
    }

    pub fn debug_enable(&self) -> bool {
        self.debug_enable
    }

    /// Count from 1 through `max_number` inclusive.
    pub fn run(&self) {
        for number in 1..=self.max_number {
            self.trace(TraceEvent::Number(number));
        }
        self.trace(TraceEvent::Finished);
    }

    #[inline]
    pub fn start_counting(&self) {
        self.run()
    }

    #[inline]
    fn trace(&self, event: TraceEvent) {
        if self.debug_enable {
            self.sink.emit(&event);
        }
    }
}
