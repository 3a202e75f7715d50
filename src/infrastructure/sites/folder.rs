//! Folder Site Implementation
//!
//! Implements the ContentSite port for a local directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use ignore::WalkBuilder;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::domain::ports::{ContentSite, SiteEntry, SiteError, SiteResult};
use crate::domain::value_objects::{content_path, ContentHash};

/// Content site backed by a local directory
///
/// The root is not checked at construction; every operation verifies it and
/// fails with [`SiteError::InvalidSite`] when it is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderSite {
    root: PathBuf,
}

impl FolderSite {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    fn invalid(&self, reason: impl Into<String>) -> SiteError {
        SiteError::InvalidSite {
            root: self.root.display().to_string(),
            reason: reason.into(),
        }
    }

    fn ensure_root(&self) -> SiteResult<()> {
        match fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(self.invalid("root is not a directory")),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(self.invalid("root directory does not exist"))
            }
            Err(err) => Err(self.invalid(err.to_string())),
        }
    }

    /// Resolve a relative content path below the root
    fn resolve(&self, path: &str) -> SiteResult<(String, PathBuf)> {
        let relative = content_path::normalize(path)?;
        let absolute = if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(&relative)
        };
        Ok((relative, absolute))
    }

    fn relative(&self, absolute: &Path) -> String {
        absolute
            .strip_prefix(&self.root)
            .unwrap_or(absolute)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn walk_error(start: &Path, err: ignore::Error) -> SiteError {
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    SiteError::io(start, source)
}

impl ContentSite for FolderSite {
    fn root(&self) -> String {
        self.root.display().to_string()
    }

    fn location(&self) -> Option<PathBuf> {
        Some(self.root.clone())
    }

    fn enumerate(&self, scope: &str) -> SiteResult<Vec<SiteEntry>> {
        self.ensure_root()?;
        let (relative, start) = self.resolve(scope)?;

        if let Err(err) = fs::symlink_metadata(&start) {
            return Err(match err.kind() {
                io::ErrorKind::NotFound => SiteError::NotFound { path: relative },
                _ => SiteError::io(&start, err),
            });
        }

        let walker = WalkBuilder::new(&start)
            .standard_filters(false)
            .follow_links(false)
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = result.map_err(|err| walk_error(&start, err))?;
            if entry.depth() == 0 && relative.is_empty() {
                continue;
            }
            let Some(file_type) = entry.file_type() else {
                continue;
            };

            let path = self.relative(entry.path());
            if file_type.is_dir() {
                entries.push(SiteEntry::directory(path));
            } else if file_type.is_file() {
                let meta = entry.metadata().map_err(|err| walk_error(entry.path(), err))?;
                entries.push(SiteEntry::file(path, meta.len(), meta.modified().ok()));
            }
            // Symlinks and special files are not content
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn read(&self, path: &str) -> SiteResult<Vec<u8>> {
        self.ensure_root()?;
        let (relative, absolute) = self.resolve(path)?;
        fs::read(&absolute).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => SiteError::NotFound { path: relative },
            _ => SiteError::io(&absolute, err),
        })
    }

    fn write(&self, path: &str, content: &[u8], modified: Option<SystemTime>) -> SiteResult<()> {
        self.ensure_root()?;
        let (_, absolute) = self.resolve(path)?;
        let parent = absolute.parent().unwrap_or(&self.root).to_path_buf();
        fs::create_dir_all(&parent).map_err(|err| SiteError::io(&parent, err))?;

        // Write next to the destination, then rename into place
        let mut staged = NamedTempFile::new_in(&parent).map_err(|err| SiteError::io(&parent, err))?;
        staged
            .write_all(content)
            .map_err(|err| SiteError::io(staged.path(), err))?;
        let file = staged
            .persist(&absolute)
            .map_err(|err| SiteError::io(&absolute, err.error))?;

        if let Some(modified) = modified {
            file.set_modified(modified)
                .map_err(|err| SiteError::io(&absolute, err))?;
        }
        Ok(())
    }

    fn create_dir(&self, path: &str) -> SiteResult<()> {
        let (relative, absolute) = self.resolve(path)?;
        if relative.is_empty() {
            return fs::create_dir_all(&self.root).map_err(|err| self.invalid(err.to_string()));
        }
        self.ensure_root()?;
        fs::create_dir_all(&absolute).map_err(|err| SiteError::io(&absolute, err))
    }

    fn delete(&self, path: &str) -> SiteResult<()> {
        self.ensure_root()?;
        let (relative, absolute) = self.resolve(path)?;
        if relative.is_empty() {
            return Err(self.invalid("refusing to delete the site root"));
        }

        let meta = match fs::symlink_metadata(&absolute) {
            Ok(meta) => meta,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(SiteError::io(&absolute, err)),
        };

        let removed = if meta.is_dir() {
            fs::remove_dir_all(&absolute)
        } else {
            fs::remove_file(&absolute)
        };
        removed.map_err(|err| SiteError::io(&absolute, err))
    }

    fn checksum(&self, path: &str) -> SiteResult<ContentHash> {
        self.ensure_root()?;
        let (relative, absolute) = self.resolve(path)?;
        let mut file = fs::File::open(&absolute).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => SiteError::NotFound { path: relative },
            _ => SiteError::io(&absolute, err),
        })?;

        let mut hasher = Sha256::new();
        io::copy(&mut file, &mut hasher).map_err(|err| SiteError::io(&absolute, err))?;
        Ok(ContentHash::new(&format!("{:x}", hasher.finalize())))
    }
}
