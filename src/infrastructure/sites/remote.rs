//! Remote Site Implementation
//!
//! Redirects the operations of a wrapped site to a remote host. The wrapped
//! site supplies the content root; every operation becomes one POSIX shell
//! command run through a [`RemoteTransport`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::domain::entities::RemoteDecorator;
use crate::domain::ports::{
    CommandOutput, ContentSite, RemoteTransport, SiteEntry, SiteError, SiteResult,
};
use crate::domain::value_objects::{content_path, ContentHash, TraceEvent};

/// Exit code scripts use when the site root is missing
const EXIT_MISSING_ROOT: i32 = 3;
/// Exit code scripts use when the addressed entry is missing
const EXIT_MISSING_ENTRY: i32 = 4;

/// Site whose operations run on `remote.computer_name`
pub struct RemoteSite {
    inner: Box<dyn ContentSite>,
    remote: RemoteDecorator,
    transport: Arc<dyn RemoteTransport>,
}

impl RemoteSite {
    pub fn new(
        inner: Box<dyn ContentSite>,
        remote: RemoteDecorator,
        transport: Arc<dyn RemoteTransport>,
    ) -> Self {
        Self {
            inner,
            remote,
            transport,
        }
    }

    pub fn host(&self) -> &str {
        &self.remote.computer_name
    }

    fn remote_root(&self) -> SiteResult<String> {
        match self.inner.location() {
            Some(path) => Ok(path.to_string_lossy().replace('\\', "/")),
            None => Err(SiteError::InvalidSite {
                root: self.root(),
                reason: "site has no path on the remote host".to_string(),
            }),
        }
    }

    fn remote_path(&self, relative: &str) -> SiteResult<String> {
        let root = self.remote_root()?;
        if relative.is_empty() {
            return Ok(root);
        }
        Ok(format!("{}/{}", root.trim_end_matches('/'), relative))
    }

    /// Prefix `body` with a check that the site root exists
    fn guarded(&self, body: &str) -> SiteResult<String> {
        let root = quote(&self.remote_root()?);
        Ok(format!("[ -d {root} ] || exit {EXIT_MISSING_ROOT}; {body}"))
    }

    fn exec(&self, script: &str, input: Option<&[u8]>) -> SiteResult<CommandOutput> {
        debug!(
            host = %self.remote.computer_name,
            transport = self.transport.name(),
            command = script,
            "running remote command"
        );
        self.transport.run(&self.remote, script, input)
    }

    fn missing_root(&self) -> SiteError {
        SiteError::InvalidSite {
            root: self.root(),
            reason: "root directory does not exist".to_string(),
        }
    }

    /// Map a finished command onto the site error model
    fn check(&self, output: CommandOutput, relative: &str, action: &str) -> SiteResult<CommandOutput> {
        match output.code {
            Some(0) => Ok(output),
            Some(EXIT_MISSING_ROOT) => Err(self.missing_root()),
            Some(EXIT_MISSING_ENTRY) => Err(SiteError::NotFound {
                path: relative.to_string(),
            }),
            code => {
                let status = code.map_or_else(|| "a signal".to_string(), |c| format!("code {}", c));
                let stderr = output.stderr_lossy();
                let mut message = format!("{} '{}' exited with {}", action, relative, status);
                if !stderr.is_empty() {
                    message.push_str(": ");
                    message.push_str(&stderr);
                }
                Err(SiteError::CommandFailed {
                    host: self.remote.computer_name.clone(),
                    message,
                })
            }
        }
    }
}

impl ContentSite for RemoteSite {
    fn root(&self) -> String {
        let path = match self.inner.location() {
            Some(path) => path.display().to_string(),
            None => self.inner.root(),
        };
        format!("{}:{}", self.remote.computer_name, path)
    }

    fn location(&self) -> Option<PathBuf> {
        self.inner.location()
    }

    fn enumerate(&self, scope: &str) -> SiteResult<Vec<SiteEntry>> {
        let relative = content_path::normalize(scope)?;
        let root = quote(&self.remote_root()?);
        let (start, depth) = if relative.is_empty() {
            (".".to_string(), "-mindepth 1 ")
        } else {
            (quote(&relative), "")
        };

        let script = format!(
            "cd {root} 2>/dev/null || exit {EXIT_MISSING_ROOT}; \
             [ -e {start} ] || exit {EXIT_MISSING_ENTRY}; \
             find {start} {depth}\\( -type f -o -type d \\) -printf '%y %s %T@ %p\\0'",
            root = root,
            start = start,
            depth = depth,
        );

        let output = self.check(self.exec(&script, None)?, &relative, "listing")?;
        parse_listing(&output.stdout).map_err(|message| SiteError::CommandFailed {
            host: self.remote.computer_name.clone(),
            message,
        })
    }

    fn read(&self, path: &str) -> SiteResult<Vec<u8>> {
        let relative = content_path::normalize(path)?;
        let target = quote(&self.remote_path(&relative)?);
        let script = self.guarded(&format!(
            "[ -f {p} ] || exit {EXIT_MISSING_ENTRY}; cat -- {p}",
            p = target
        ))?;

        let output = self.check(self.exec(&script, None)?, &relative, "reading")?;
        Ok(output.stdout)
    }

    fn write(&self, path: &str, content: &[u8], modified: Option<SystemTime>) -> SiteResult<()> {
        let relative = content_path::normalize(path)?;
        let destination = self.remote_path(&relative)?;
        let parent = self.remote_path(content_path::parent(&relative).unwrap_or(""))?;
        let staged = quote(&format!("{}.webdeploy-tmp", destination));
        let destination = quote(&destination);

        let mut body = format!(
            "mkdir -p -- {parent} && cat > {staged} && mv -f -- {staged} {dest}",
            parent = quote(&parent),
            staged = staged,
            dest = destination,
        );
        if let Some(stamp) = modified.and_then(format_epoch) {
            body.push_str(&format!(" && touch -m -d @{} -- {}", stamp, destination));
        }
        body.push_str(&format!(" || {{ rm -f -- {}; exit 1; }}", staged));

        let script = self.guarded(&body)?;
        self.check(self.exec(&script, Some(content))?, &relative, "writing")?;
        Ok(())
    }

    fn create_dir(&self, path: &str) -> SiteResult<()> {
        let relative = content_path::normalize(path)?;
        let target = quote(&self.remote_path(&relative)?);

        if relative.is_empty() {
            let output = self.exec(&format!("mkdir -p -- {}", target), None)?;
            if !output.success() {
                return Err(SiteError::InvalidSite {
                    root: self.root(),
                    reason: output.stderr_lossy(),
                });
            }
            return Ok(());
        }

        let script = self.guarded(&format!("mkdir -p -- {}", target))?;
        self.check(self.exec(&script, None)?, &relative, "creating")?;
        Ok(())
    }

    fn delete(&self, path: &str) -> SiteResult<()> {
        let relative = content_path::normalize(path)?;
        if relative.is_empty() {
            return Err(SiteError::InvalidSite {
                root: self.root(),
                reason: "refusing to delete the site root".to_string(),
            });
        }

        let target = quote(&self.remote_path(&relative)?);
        let script = self.guarded(&format!("rm -rf -- {}", target))?;
        self.check(self.exec(&script, None)?, &relative, "deleting")?;
        Ok(())
    }

    fn checksum(&self, path: &str) -> SiteResult<ContentHash> {
        let relative = content_path::normalize(path)?;
        let target = quote(&self.remote_path(&relative)?);
        // sha256sum on Linux, shasum on macOS
        let script = self.guarded(&format!(
            "[ -f {p} ] || exit {EXIT_MISSING_ENTRY}; \
             {{ sha256sum -- {p} 2>/dev/null || shasum -a 256 {p}; }} | cut -d' ' -f1",
            p = target
        ))?;

        let output = self.check(self.exec(&script, None)?, &relative, "hashing")?;
        Ok(ContentHash::new(&String::from_utf8_lossy(&output.stdout)))
    }

    fn trace(&self, event: &TraceEvent) {
        self.inner.trace(event);
    }
}

/// Quote a value for safe use in shell commands
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Parse `find -printf '%y %s %T@ %p\0'` output
fn parse_listing(stdout: &[u8]) -> Result<Vec<SiteEntry>, String> {
    let mut entries = Vec::new();

    for record in stdout.split(|byte| *byte == 0).filter(|r| !r.is_empty()) {
        let record = String::from_utf8_lossy(record);
        let mut fields = record.splitn(4, ' ');
        let (Some(kind), Some(size), Some(mtime), Some(path)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(format!("malformed listing record '{}'", record));
        };

        let path = path.strip_prefix("./").unwrap_or(path);
        match kind {
            "d" => entries.push(SiteEntry::directory(path)),
            "f" => {
                let len = size
                    .parse::<u64>()
                    .map_err(|_| format!("invalid size '{}' for '{}'", size, path))?;
                entries.push(SiteEntry::file(path, len, parse_epoch(mtime)));
            }
            _ => {}
        }
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

/// Parse `seconds[.fraction]` since the Unix epoch
fn parse_epoch(value: &str) -> Option<SystemTime> {
    let (secs, fraction) = value.split_once('.').unwrap_or((value, ""));
    let secs: u64 = secs.parse().ok()?;
    let digits: String = fraction.chars().take(9).collect();
    let nanos = if digits.is_empty() {
        0
    } else {
        format!("{:0<9}", digits).parse::<u32>().ok()?
    };
    Some(UNIX_EPOCH + Duration::new(secs, nanos))
}

fn format_epoch(time: SystemTime) -> Option<String> {
    let since = time.duration_since(UNIX_EPOCH).ok()?;
    Some(format!("{}.{:09}", since.as_secs(), since.subsec_nanos()))
}
