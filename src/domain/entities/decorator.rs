//! Site decorators
//!
//! A decorator wraps the behavior of the site it is attached to. Decorators
//! are applied in the order they were attached and pass through every
//! operation they do not intercept.

use std::fmt;
use std::sync::Arc;

use crate::domain::ports::TraceSink;

/// One layer of a site's decorator chain
#[derive(Debug, Clone, PartialEq)]
pub enum Decorator {
    /// Redirect site operations to a remote host
    Remote(RemoteDecorator),
    /// Forward trace events to an observer
    Trace(TraceDecorator),
}

/// Runs the decorated site's operations on `computer_name`
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteDecorator {
    pub computer_name: String,
    pub user_name: String,
    pub password: String,
}

impl RemoteDecorator {
    pub fn new(
        computer_name: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            computer_name: computer_name.into(),
            user_name: user_name.into(),
            password: password.into(),
        }
    }

    /// `user@host` form used by shell transports
    pub fn destination(&self) -> String {
        if self.user_name.is_empty() {
            self.computer_name.clone()
        } else {
            format!("{}@{}", self.user_name, self.computer_name)
        }
    }
}

impl fmt::Debug for RemoteDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteDecorator")
            .field("computer_name", &self.computer_name)
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Forwards every trace event of the decorated site to `sink`
#[derive(Clone)]
pub struct TraceDecorator {
    sink: Arc<dyn TraceSink>,
}

impl TraceDecorator {
    pub fn new(sink: Arc<dyn TraceSink>) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> Arc<dyn TraceSink> {
        Arc::clone(&self.sink)
    }
}

/// Two trace decorators are equal when they feed the same sink
impl PartialEq for TraceDecorator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sink, &other.sink)
    }
}

impl fmt::Debug for TraceDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceDecorator").finish_non_exhaustive()
    }
}
