//! Error types for WebDeploy
//!
//! Uses `thiserror` for library errors. Content-site failures are reported as
//! [`SiteError`] and wrapped into [`WebDeployError::SyncExecution`] at the
//! runner boundary.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::SiteError;

/// Result type alias for WebDeploy operations
pub type WebDeployResult<T> = Result<T, WebDeployError>;

/// Main error type for WebDeploy operations
#[derive(Error, Debug)]
pub enum WebDeployError {
    /// Synchronizing one deployment task failed
    #[error("deployment task '{task}' failed: {source}")]
    SyncExecution {
        task: String,
        #[source]
        source: SiteError,
    },

    /// A remote task is missing the credentials its server requires
    #[error("task '{task}' targets server '{server}' but has no {missing}")]
    MissingCredentials {
        task: String,
        server: String,
        missing: &'static str,
    },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The background dispatch worker has exited
    #[error("dispatch worker is no longer running")]
    WorkerStopped,
}
