//! SSH Transport
//!
//! Runs remote site commands through the system `ssh` client. A password is
//! handed to `sshpass -e` through the `SSHPASS` environment variable so it
//! never appears on a command line; without one, `BatchMode=yes` makes ssh
//! fail instead of prompting.

use std::process::{Command, Stdio};

use crate::domain::entities::RemoteDecorator;
use crate::domain::ports::{CommandOutput, RemoteTransport, SiteError, SiteResult};

/// Exit code ssh reserves for its own failures
const SSH_ERROR: i32 = 255;
/// sshpass: invalid or incorrect password
const SSHPASS_BAD_PASSWORD: i32 = 5;

const AUTH_MARKERS: &[&str] = &[
    "Permission denied",
    "Authentication failed",
    "Too many authentication failures",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTransport {
    program: String,
    options: Vec<String>,
}

impl Default for SshTransport {
    fn default() -> Self {
        Self::new("ssh")
    }
}

impl SshTransport {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            options: Vec::new(),
        }
    }

    /// Extra arguments passed to ssh before the destination
    pub fn with_options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, remote: &RemoteDecorator, script: &str) -> Command {
        let mut cmd = if remote.password.is_empty() {
            let mut cmd = Command::new(&self.program);
            cmd.args(["-o", "BatchMode=yes"]);
            cmd
        } else {
            let mut cmd = Command::new("sshpass");
            cmd.arg("-e").arg(&self.program).env("SSHPASS", &remote.password);
            cmd
        };
        cmd.args(&self.options)
            .arg(remote.destination())
            .arg(script);
        cmd
    }

    fn connection_error(remote: &RemoteDecorator, message: impl Into<String>) -> SiteError {
        SiteError::Connection {
            host: remote.computer_name.clone(),
            message: message.into(),
        }
    }
}

/// Separate ssh/sshpass failures from the remote command's own exit status
fn classify(
    remote: &RemoteDecorator,
    uses_sshpass: bool,
    output: CommandOutput,
) -> SiteResult<CommandOutput> {
    let authentication = |message: String| SiteError::Authentication {
        host: remote.computer_name.clone(),
        user: remote.user_name.clone(),
        message,
    };

    match output.code {
        Some(SSHPASS_BAD_PASSWORD) if uses_sshpass => {
            Err(authentication("password rejected".to_string()))
        }
        Some(SSH_ERROR) => {
            let stderr = output.stderr_lossy();
            if AUTH_MARKERS.iter().any(|marker| stderr.contains(marker)) {
                Err(authentication(stderr))
            } else {
                Err(SshTransport::connection_error(remote, stderr))
            }
        }
        _ => Ok(output),
    }
}

impl RemoteTransport for SshTransport {
    fn name(&self) -> &'static str {
        "ssh"
    }

    fn run(
        &self,
        remote: &RemoteDecorator,
        command: &str,
        input: Option<&[u8]>,
    ) -> SiteResult<CommandOutput> {
        let uses_sshpass = !remote.password.is_empty();
        let launcher = if uses_sshpass { "sshpass" } else { self.program.as_str() };

        let child = self
            .command(remote, command)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                Self::connection_error(remote, format!("failed to start {}: {}", launcher, err))
            })?;

        let output = super::child::finish(child, input)
            .map_err(|err| Self::connection_error(remote, err.to_string()))?;

        classify(
            remote,
            uses_sshpass,
            CommandOutput {
                code: output.status.code(),
                stdout: output.stdout,
                stderr: output.stderr,
            },
        )
    }
}
