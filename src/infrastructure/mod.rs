//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `sites/` - Content sites (Folder, LocalApplication, Remote, Traced)
//! - `transport/` - Remote transports (Ssh, local shell)
//! - `trace/` - Trace sinks

pub mod sites;
pub mod trace;
pub mod transport;

// Re-export for convenience
pub use sites::{FolderSite, LocalApplicationSite, RemoteSite, SiteEnvironment, TracedSite};
pub use trace::LogTraceSink;
pub use transport::{ShellTransport, SshTransport};
