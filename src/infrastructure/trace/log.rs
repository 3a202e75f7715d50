//! Trace sink that forwards synchronization events to `tracing`
//!
//! Every event becomes an informational record under the `webdeploy::trace`
//! target, formatted `WebDeploy <level> : <message>`.

use tracing::info;

use crate::domain::ports::TraceSink;
use crate::domain::value_objects::TraceEvent;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogTraceSink;

impl LogTraceSink {
    pub fn format(event: &TraceEvent) -> String {
        format!("WebDeploy {} : {}", event.level, event.message)
    }
}

impl TraceSink for LogTraceSink {
    fn on_trace(&self, event: &TraceEvent) {
        if event.data.is_null() {
            info!(target: "webdeploy::trace", "{}", Self::format(event));
        } else {
            info!(target: "webdeploy::trace", data = %event.data, "{}", Self::format(event));
        }
    }
}
