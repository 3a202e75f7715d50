//! Site environment
//!
//! Resolves [`Site`] descriptions against the host: where the running
//! application lives and how remote servers are reached.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::{Decorator, Site, SiteKind};
use crate::domain::ports::{ContentSite, RemoteTransport, SiteResolver};

use super::{FolderSite, LocalApplicationSite, RemoteSite, TracedSite};

#[derive(Clone)]
pub struct SiteEnvironment {
    application_root: PathBuf,
    transport: Arc<dyn RemoteTransport>,
}

impl SiteEnvironment {
    pub fn new(application_root: impl Into<PathBuf>, transport: Arc<dyn RemoteTransport>) -> Self {
        Self {
            application_root: application_root.into(),
            transport,
        }
    }

    pub fn application_root(&self) -> &Path {
        &self.application_root
    }

    pub fn transport(&self) -> &dyn RemoteTransport {
        self.transport.as_ref()
    }
}

impl std::fmt::Debug for SiteEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteEnvironment")
            .field("application_root", &self.application_root)
            .field("transport", &self.transport.name())
            .finish()
    }
}

impl SiteResolver for SiteEnvironment {
    fn open(&self, site: &Site) -> Box<dyn ContentSite> {
        let mut opened: Box<dyn ContentSite> = match site.kind() {
            SiteKind::Folder(path) => Box::new(FolderSite::new(path)),
            SiteKind::LocalApplication => {
                Box::new(LocalApplicationSite::new(&self.application_root))
            }
        };

        for decorator in site.decorators() {
            opened = match decorator {
                Decorator::Remote(remote) => Box::new(RemoteSite::new(
                    opened,
                    remote.clone(),
                    Arc::clone(&self.transport),
                )),
                Decorator::Trace(trace) => Box::new(TracedSite::new(opened, trace.sink())),
            };
        }
        opened
    }
}
