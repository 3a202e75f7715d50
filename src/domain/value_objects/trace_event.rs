//! Trace events emitted by the synchronization engine

use std::fmt;

use serde_json::Value;

/// Severity of a trace event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceLevel {
    Error,
    Warning,
    Info,
    Verbose,
}

impl TraceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceLevel::Error => "Error",
            TraceLevel::Warning => "Warning",
            TraceLevel::Info => "Info",
            TraceLevel::Verbose => "Verbose",
        }
    }
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observation from the synchronization algorithm
///
/// `data` is opaque to the dispatcher; the engine attaches whatever context
/// it has (entry path, sizes, the run summary).
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEvent {
    pub level: TraceLevel,
    pub message: String,
    pub data: Value,
}

impl TraceEvent {
    pub fn new(level: TraceLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            data: Value::Null,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(TraceLevel::Info, message)
    }

    pub fn verbose(message: impl Into<String>) -> Self {
        Self::new(TraceLevel::Verbose, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(TraceLevel::Warning, message)
    }

    /// Attach auxiliary data to the event
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}
