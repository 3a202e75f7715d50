//! Content Site Port
//!
//! A content site is a live, addressable content root: a local folder, the
//! running application, or either of those reached through a remote
//! transport. The synchronization engine only ever talks to sites through
//! this trait, so the same algorithm targets every kind of endpoint.
//!
//! Paths are relative, `/`-separated and normalized (see
//! [`content_path`](crate::domain::value_objects::content_path)); the empty
//! path is the root.

use std::path::PathBuf;
use std::time::SystemTime;

use thiserror::Error;

use crate::domain::value_objects::{ContentHash, TraceEvent};

/// Result type for content site operations
pub type SiteResult<T> = Result<T, SiteError>;

/// Content site operation errors
#[derive(Error, Debug)]
pub enum SiteError {
    /// The site root cannot be resolved
    #[error("invalid site '{root}': {reason}")]
    InvalidSite { root: String, reason: String },

    /// Entry does not exist
    #[error("not found: {path}")]
    NotFound { path: String },

    /// Path leaves the site root
    #[error("path '{path}' escapes the site root")]
    PathEscape { path: String },

    /// Local I/O failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote host unreachable
    #[error("connection to '{host}' failed: {message}")]
    Connection { host: String, message: String },

    /// Remote host rejected the credentials
    #[error("authentication as '{user}' on '{host}' failed: {message}")]
    Authentication {
        host: String,
        user: String,
        message: String,
    },

    /// Remote command exited unsuccessfully
    #[error("remote command failed on '{host}': {message}")]
    CommandFailed { host: String, message: String },
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Kind of entry in a content tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry reported by [`ContentSite::enumerate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteEntry {
    /// Normalized path relative to the site root
    pub path: String,
    pub kind: EntryKind,
    /// Size in bytes (0 for directories)
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl SiteEntry {
    pub fn file(path: impl Into<String>, len: u64, modified: Option<SystemTime>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            len,
            modified,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            len: 0,
            modified: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Live content endpoint
///
/// Implementations:
/// - `FolderSite` - a local directory
/// - `LocalApplicationSite` - the content root of the running application
/// - `RemoteSite` - redirects another site's operations to a remote host
/// - `TracedSite` - forwards trace events to an observer
pub trait ContentSite: Send + Sync {
    /// Human-readable address of the site (for logging)
    fn root(&self) -> String;

    /// Filesystem path the site is rooted at, if it has one
    fn location(&self) -> Option<PathBuf>;

    /// List `scope` and everything below it, sorted by path
    ///
    /// A missing root fails with [`SiteError::InvalidSite`], a missing scope
    /// with [`SiteError::NotFound`]. The root itself is never listed.
    fn enumerate(&self, scope: &str) -> SiteResult<Vec<SiteEntry>>;

    /// Read a file's content
    fn read(&self, path: &str) -> SiteResult<Vec<u8>>;

    /// Write a file, creating parent directories
    ///
    /// When `modified` is given the written file carries that timestamp.
    fn write(&self, path: &str, content: &[u8], modified: Option<SystemTime>) -> SiteResult<()>;

    /// Create a directory and its parents; the empty path creates the root
    fn create_dir(&self, path: &str) -> SiteResult<()>;

    /// Delete a file or a directory tree; deleting a missing entry succeeds
    fn delete(&self, path: &str) -> SiteResult<()>;

    /// Compute the content hash of a file
    fn checksum(&self, path: &str) -> SiteResult<ContentHash> {
        self.read(path).map(|content| ContentHash::from_bytes(&content))
    }

    /// Observation point for the synchronization engine
    ///
    /// Undecorated sites discard events.
    fn trace(&self, _event: &TraceEvent) {}
}
