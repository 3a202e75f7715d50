//! Trace Sink Port
//!
//! Observer that receives every trace event a decorated site emits. Any
//! `Fn(&TraceEvent) + Send + Sync` closure is a sink.

use crate::domain::value_objects::TraceEvent;

/// Receiver of synchronization trace events
pub trait TraceSink: Send + Sync {
    fn on_trace(&self, event: &TraceEvent);
}

impl<F> TraceSink for F
where
    F: Fn(&TraceEvent) + Send + Sync,
{
    fn on_trace(&self, event: &TraceEvent) {
        self(event)
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTraceSink;

impl TraceSink for NoopTraceSink {
    fn on_trace(&self, _event: &TraceEvent) {}
}
