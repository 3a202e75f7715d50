//! Sync Engine Port
//!
//! The content synchronization algorithm. It brings a target site in line
//! with a source site, restricted to a set of path filters.

use std::fmt;

use serde::Serialize;

use crate::domain::value_objects::SyncOptions;

use super::content_site::{ContentSite, SiteResult};

/// Counts of what one synchronization changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl SyncSummary {
    /// Check if the target was modified
    pub fn has_changes(&self) -> bool {
        self.added + self.updated + self.deleted > 0
    }

    /// Accumulate another summary into this one
    pub fn merge(&mut self, other: SyncSummary) {
        self.added += other.added;
        self.updated += other.updated;
        self.deleted += other.deleted;
        self.unchanged += other.unchanged;
    }
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} updated, {} deleted, {} unchanged",
            self.added, self.updated, self.deleted, self.unchanged
        )
    }
}

/// Synchronization algorithm
pub trait SyncEngine: Send + Sync {
    /// Name of this engine (for logging)
    fn name(&self) -> &'static str;

    /// Synchronize `target` from `source`
    ///
    /// An empty `paths` slice synchronizes everything under the root. Each
    /// call is a single attempt; implementations do not retry.
    fn synchronize(
        &self,
        source: &dyn ContentSite,
        target: &dyn ContentSite,
        options: &SyncOptions,
        paths: &[String],
    ) -> SiteResult<SyncSummary>;
}
