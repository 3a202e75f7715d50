//! Local shell transport
//!
//! Runs remote site commands with `sh -c` on this machine, ignoring the
//! target host. Used for loopback deployments where the "remote" server is
//! the local one.

use std::process::{Command, Stdio};

use crate::domain::entities::RemoteDecorator;
use crate::domain::ports::{CommandOutput, RemoteTransport, SiteError, SiteResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTransport {
    shell: String,
}

impl Default for ShellTransport {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl ShellTransport {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl RemoteTransport for ShellTransport {
    fn name(&self) -> &'static str {
        "local-shell"
    }

    fn run(
        &self,
        remote: &RemoteDecorator,
        command: &str,
        input: Option<&[u8]>,
    ) -> SiteResult<CommandOutput> {
        let connection = |message: String| SiteError::Connection {
            host: remote.computer_name.clone(),
            message,
        };

        let child = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| connection(format!("failed to start {}: {}", self.shell, err)))?;

        let output =
            super::child::finish(child, input).map_err(|err| connection(err.to_string()))?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
