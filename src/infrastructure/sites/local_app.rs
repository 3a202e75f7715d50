//! Local Application Site
//!
//! The content root of the running host application. Behaves like a folder
//! site rooted at the configured application root.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::domain::ports::{ContentSite, SiteEntry, SiteResult};
use crate::domain::value_objects::ContentHash;

use super::folder::FolderSite;

/// Content site for the running application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalApplicationSite {
    folder: FolderSite,
}

impl LocalApplicationSite {
    pub fn new(application_root: impl Into<PathBuf>) -> Self {
        Self {
            folder: FolderSite::new(application_root),
        }
    }

    pub fn application_root(&self) -> &Path {
        self.folder.root_path()
    }
}

impl ContentSite for LocalApplicationSite {
    fn root(&self) -> String {
        format!("application ({})", self.folder.root())
    }

    fn location(&self) -> Option<PathBuf> {
        self.folder.location()
    }

    fn enumerate(&self, scope: &str) -> SiteResult<Vec<SiteEntry>> {
        self.folder.enumerate(scope)
    }

    fn read(&self, path: &str) -> SiteResult<Vec<u8>> {
        self.folder.read(path)
    }

    fn write(&self, path: &str, content: &[u8], modified: Option<SystemTime>) -> SiteResult<()> {
        self.folder.write(path, content, modified)
    }

    fn create_dir(&self, path: &str) -> SiteResult<()> {
        self.folder.create_dir(path)
    }

    fn delete(&self, path: &str) -> SiteResult<()> {
        self.folder.delete(path)
    }

    fn checksum(&self, path: &str) -> SiteResult<ContentHash> {
        self.folder.checksum(path)
    }
}
