//! Site descriptions
//!
//! A [`Site`] says *what* to synchronize from or to: a content root plus its
//! decorator chain. It performs no I/O; a
//! [`SiteResolver`](crate::domain::ports::SiteResolver) opens it into a live
//! content site when a runner executes.

use std::fmt;
use std::path::{Path, PathBuf};

use super::decorator::{Decorator, RemoteDecorator};

/// Content root of a site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteKind {
    /// A directory on the file system
    Folder(PathBuf),
    /// The content root of the running host application
    LocalApplication,
}

/// A content root with its ordered decorator chain
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    kind: SiteKind,
    decorators: Vec<Decorator>,
}

impl Site {
    /// Folder site rooted at `path`; the path is not checked until first access
    pub fn folder(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: SiteKind::Folder(path.into()),
            decorators: Vec::new(),
        }
    }

    /// Site backed by the running application's content root
    pub fn local_application() -> Self {
        Self {
            kind: SiteKind::LocalApplication,
            decorators: Vec::new(),
        }
    }

    pub fn kind(&self) -> &SiteKind {
        &self.kind
    }

    /// Folder path, `None` for the local application
    pub fn path(&self) -> Option<&Path> {
        match &self.kind {
            SiteKind::Folder(path) => Some(path),
            SiteKind::LocalApplication => None,
        }
    }

    pub fn is_local_application(&self) -> bool {
        self.kind == SiteKind::LocalApplication
    }

    /// Decorators in the order they are applied
    pub fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }

    /// Append a decorator to the chain
    pub fn decorate(&mut self, decorator: Decorator) {
        self.decorators.push(decorator);
    }

    pub fn with_decorator(mut self, decorator: Decorator) -> Self {
        self.decorate(decorator);
        self
    }

    pub fn remote_decorators(&self) -> impl Iterator<Item = &RemoteDecorator> {
        self.decorators.iter().filter_map(|decorator| match decorator {
            Decorator::Remote(remote) => Some(remote),
            Decorator::Trace(_) => None,
        })
    }

    pub fn trace_decorator_count(&self) -> usize {
        self.decorators
            .iter()
            .filter(|decorator| matches!(decorator, Decorator::Trace(_)))
            .count()
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let remote = self.remote_decorators().next();
        match (&self.kind, remote) {
            (SiteKind::Folder(path), Some(remote)) => {
                write!(f, "{}:{}", remote.computer_name, path.display())
            }
            (SiteKind::Folder(path), None) => write!(f, "{}", path.display()),
            (SiteKind::LocalApplication, Some(remote)) => {
                write!(f, "{}:<application>", remote.computer_name)
            }
            (SiteKind::LocalApplication, None) => write!(f, "<application>"),
        }
    }
}
