//! Deployment Runner
//!
//! One ready-to-run synchronization job: source site, target site, options
//! and path filters. Built fresh for every publish, never cached.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::Site;
use crate::domain::ports::{SiteResolver, SyncEngine, SyncSummary};
use crate::domain::value_objects::SyncOptions;
use crate::error::{WebDeployError, WebDeployResult};

pub struct DeploymentRunner {
    pub source_site: Site,
    pub target_site: Site,
    pub sync_options: SyncOptions,
    pub paths: Vec<String>,
    label: String,
    resolver: Arc<dyn SiteResolver>,
    engine: Arc<dyn SyncEngine>,
}

impl DeploymentRunner {
    pub(crate) fn new(
        label: String,
        source_site: Site,
        target_site: Site,
        sync_options: SyncOptions,
        paths: Vec<String>,
        resolver: Arc<dyn SiteResolver>,
        engine: Arc<dyn SyncEngine>,
    ) -> Self {
        Self {
            source_site,
            target_site,
            sync_options,
            paths,
            label,
            resolver,
            engine,
        }
    }

    /// Name of the task this runner was built from
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Synchronize the target site from the source site
    ///
    /// Makes a single attempt. Any failure is wrapped in
    /// [`WebDeployError::SyncExecution`].
    pub fn execute(&self) -> WebDeployResult<SyncSummary> {
        debug!(
            task = %self.label,
            source = %self.source_site,
            target = %self.target_site,
            engine = self.engine.name(),
            "executing deployment runner"
        );

        let source = self.resolver.open(&self.source_site);
        let target = self.resolver.open(&self.target_site);

        self.engine
            .synchronize(source.as_ref(), target.as_ref(), &self.sync_options, &self.paths)
            .map_err(|source| WebDeployError::SyncExecution {
                task: self.label.clone(),
                source,
            })
    }
}

/// Runners are equal when they would perform the same synchronization
impl PartialEq for DeploymentRunner {
    fn eq(&self, other: &Self) -> bool {
        self.source_site == other.source_site
            && self.target_site == other.target_site
            && self.sync_options == other.sync_options
            && self.paths == other.paths
    }
}

impl fmt::Debug for DeploymentRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentRunner")
            .field("label", &self.label)
            .field("source_site", &self.source_site)
            .field("target_site", &self.target_site)
            .field("sync_options", &self.sync_options)
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}
