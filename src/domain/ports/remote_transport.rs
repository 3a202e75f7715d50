//! Remote Transport Port
//!
//! Executes POSIX shell commands on a remote host on behalf of a
//! remote-decorated site. How the host is reached (ssh, a local shell, an
//! agent) is up to the implementation.

use crate::domain::entities::RemoteDecorator;

use super::content_site::SiteResult;

/// Output of a command run on a remote host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the command was killed by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Transport for remote site operations
pub trait RemoteTransport: Send + Sync {
    /// Name of this transport (for logging)
    fn name(&self) -> &'static str;

    /// Run `command` on the host named by `remote`, feeding `input` on stdin
    ///
    /// Returns `Err` only when the command could not be run at all
    /// (connection or authentication failure). A command that ran and exited
    /// non-zero is reported through [`CommandOutput::code`].
    fn run(
        &self,
        remote: &RemoteDecorator,
        command: &str,
        input: Option<&[u8]>,
    ) -> SiteResult<CommandOutput>;
}
