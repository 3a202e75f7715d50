//! Trace-decorated site
//!
//! Passes every operation through to the wrapped site and forwards trace
//! events to a sink after the inner chain has seen them.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use crate::domain::ports::{ContentSite, SiteEntry, SiteResult, TraceSink};
use crate::domain::value_objects::{ContentHash, TraceEvent};

pub struct TracedSite {
    inner: Box<dyn ContentSite>,
    sink: Arc<dyn TraceSink>,
}

impl TracedSite {
    pub fn new(inner: Box<dyn ContentSite>, sink: Arc<dyn TraceSink>) -> Self {
        Self { inner, sink }
    }
}

impl ContentSite for TracedSite {
    fn root(&self) -> String {
        self.inner.root()
    }

    fn location(&self) -> Option<PathBuf> {
        self.inner.location()
    }

    fn enumerate(&self, scope: &str) -> SiteResult<Vec<SiteEntry>> {
        self.inner.enumerate(scope)
    }

    fn read(&self, path: &str) -> SiteResult<Vec<u8>> {
        self.inner.read(path)
    }

    fn write(&self, path: &str, content: &[u8], modified: Option<SystemTime>) -> SiteResult<()> {
        self.inner.write(path, content, modified)
    }

    fn create_dir(&self, path: &str) -> SiteResult<()> {
        self.inner.create_dir(path)
    }

    fn delete(&self, path: &str) -> SiteResult<()> {
        self.inner.delete(path)
    }

    fn checksum(&self, path: &str) -> SiteResult<ContentHash> {
        self.inner.checksum(path)
    }

    fn trace(&self, event: &TraceEvent) {
        self.inner.trace(event);
        self.sink.on_trace(event);
    }
}
