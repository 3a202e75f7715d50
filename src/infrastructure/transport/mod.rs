//! Remote transports
//!
//! Implementations of the RemoteTransport port.

mod child;
mod shell;
mod ssh;

pub use shell::ShellTransport;
pub use ssh::SshTransport;
