//! Tree synchronization service
//!
//! Default [`SyncEngine`]: makes the target tree mirror the source tree under
//! each path filter. Works purely through the [`ContentSite`] port, so the
//! same algorithm serves folders, the local application and remote hosts.

use std::collections::{HashMap, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::json;

use crate::domain::ports::{
    ContentSite, EntryKind, SiteEntry, SiteError, SiteResult, SyncEngine, SyncSummary,
};
use crate::domain::value_objects::{content_path, SyncOptions, TraceEvent};

#[cfg(test)]
mod tests;

/// Mirrors source trees onto target sites
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSyncEngine;

impl TreeSyncEngine {
    pub fn new() -> Self {
        Self
    }

    fn sync_scope(
        &self,
        source: &dyn ContentSite,
        target: &dyn ContentSite,
        options: &SyncOptions,
        scope: &str,
        source_entries: &[SiteEntry],
    ) -> SiteResult<SyncSummary> {
        let target_entries = match target.enumerate(scope) {
            Ok(entries) => entries,
            Err(SiteError::NotFound { .. }) => Vec::new(),
            Err(err) => return Err(err),
        };
        let existing: HashMap<&str, &SiteEntry> = target_entries
            .iter()
            .map(|entry| (entry.path.as_str(), entry))
            .collect();

        let mut summary = SyncSummary::default();
        // Target directories removed wholesale because a file replaced them
        let mut replaced: Vec<&str> = Vec::new();

        for entry in source_entries {
            match existing.get(entry.path.as_str()) {
                Some(current) if current.kind == entry.kind => {
                    if entry.kind == EntryKind::Directory {
                        continue;
                    }
                    if self.differs(source, target, entry, current, options)? {
                        copy_file(source, target, entry)?;
                        target.trace(&change_event("Updating file", entry));
                        summary.updated += 1;
                    } else {
                        target.trace(&TraceEvent::verbose(format!(
                            "Skipping unchanged file ({})",
                            entry.path
                        )));
                        summary.unchanged += 1;
                    }
                }
                Some(current) => {
                    target.delete(&current.path)?;
                    target.trace(&change_event("Deleting", current));
                    if current.kind == EntryKind::Directory {
                        replaced.push(current.path.as_str());
                    }
                    add_entry(source, target, entry)?;
                    summary.updated += 1;
                }
                None => {
                    add_entry(source, target, entry)?;
                    summary.added += 1;
                }
            }
        }

        if !options.do_not_delete {
            let wanted: HashSet<&str> = source_entries
                .iter()
                .map(|entry| entry.path.as_str())
                .collect();

            // Sorted ascending, so reversed order visits children before parents
            for entry in target_entries.iter().rev() {
                if wanted.contains(entry.path.as_str()) || is_below_any(&entry.path, &replaced) {
                    continue;
                }
                target.delete(&entry.path)?;
                target.trace(&change_event("Deleting", entry));
                summary.deleted += 1;
            }
        }

        Ok(summary)
    }

    fn differs(
        &self,
        source: &dyn ContentSite,
        target: &dyn ContentSite,
        entry: &SiteEntry,
        current: &SiteEntry,
        options: &SyncOptions,
    ) -> SiteResult<bool> {
        if entry.len != current.len {
            return Ok(true);
        }

        if options.use_checksum {
            let expected = source.checksum(&entry.path)?;
            let actual = target.checksum(&current.path)?;
            return Ok(actual.is_empty() || expected != actual);
        }

        match (unix_seconds(entry.modified), unix_seconds(current.modified)) {
            (Some(ours), Some(theirs)) => Ok(ours != theirs),
            _ => Ok(true),
        }
    }
}

impl SyncEngine for TreeSyncEngine {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn synchronize(
        &self,
        source: &dyn ContentSite,
        target: &dyn ContentSite,
        options: &SyncOptions,
        paths: &[String],
    ) -> SiteResult<SyncSummary> {
        let scopes = if paths.is_empty() {
            vec![String::new()]
        } else {
            paths
                .iter()
                .map(|path| content_path::normalize(path))
                .collect::<SiteResult<Vec<_>>>()?
        };

        source.trace(&TraceEvent::info(format!(
            "Synchronizing {} to {}",
            source.root(),
            target.root()
        )));

        // Read every source scope before touching the target
        let mut planned = Vec::with_capacity(scopes.len());
        for scope in &scopes {
            source.trace(&TraceEvent::verbose(format!(
                "Enumerating source ({})",
                display_scope(scope)
            )));
            planned.push((scope.as_str(), source.enumerate(scope)?));
        }

        target.create_dir("")?;

        let mut summary = SyncSummary::default();
        for (scope, entries) in planned {
            let scoped = self.sync_scope(source, target, options, scope, &entries)?;
            target.trace(
                &TraceEvent::verbose(format!(
                    "Path ({}) synchronized: {}",
                    display_scope(scope),
                    scoped
                ))
                .with_data(json!({ "path": scope })),
            );
            summary.merge(scoped);
        }

        target.trace(
            &TraceEvent::info(format!("Synchronization completed: {}", summary)).with_data(json!({
                "added": summary.added,
                "updated": summary.updated,
                "deleted": summary.deleted,
                "unchanged": summary.unchanged,
            })),
        );

        Ok(summary)
    }
}

fn add_entry(
    source: &dyn ContentSite,
    target: &dyn ContentSite,
    entry: &SiteEntry,
) -> SiteResult<()> {
    match entry.kind {
        EntryKind::Directory => {
            target.create_dir(&entry.path)?;
            target.trace(&change_event("Adding directory", entry));
        }
        EntryKind::File => {
            copy_file(source, target, entry)?;
            target.trace(&change_event("Adding file", entry));
        }
    }
    Ok(())
}

fn copy_file(
    source: &dyn ContentSite,
    target: &dyn ContentSite,
    entry: &SiteEntry,
) -> SiteResult<()> {
    let content = source.read(&entry.path)?;
    target.write(&entry.path, &content, entry.modified)
}

fn change_event(action: &str, entry: &SiteEntry) -> TraceEvent {
    TraceEvent::info(format!("{} ({})", action, entry.path))
        .with_data(json!({ "path": entry.path, "size": entry.len }))
}

fn is_below_any(path: &str, roots: &[&str]) -> bool {
    roots.iter().any(|root| {
        path.strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
    })
}

fn unix_seconds(time: Option<SystemTime>) -> Option<u64> {
    time.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
}

fn display_scope(scope: &str) -> &str {
    if scope.is_empty() {
        "/"
    } else {
        scope
    }
}
