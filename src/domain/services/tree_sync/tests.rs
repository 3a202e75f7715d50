//! Tests for the tree synchronization service

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::*;
use crate::domain::value_objects::TraceLevel;

/// In-memory content site; `None` content marks a directory
struct MemorySite {
    name: &'static str,
    valid: bool,
    entries: Mutex<BTreeMap<String, (Option<Vec<u8>>, Option<SystemTime>)>>,
    events: Mutex<Vec<TraceEvent>>,
    checksums: Mutex<usize>,
}

impl MemorySite {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            valid: true,
            entries: Mutex::new(BTreeMap::new()),
            events: Mutex::new(Vec::new()),
            checksums: Mutex::new(0),
        }
    }

    fn invalid(name: &'static str) -> Self {
        Self {
            valid: false,
            ..Self::new(name)
        }
    }

    fn with_file(self, path: &str, content: &str, modified: u64) -> Self {
        self.write(path, content.as_bytes(), Some(at(modified)))
            .unwrap();
        self
    }

    fn with_dir(self, path: &str) -> Self {
        self.create_dir(path).unwrap();
        self
    }

    fn content(&self, path: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(path)
            .and_then(|(content, _)| content.clone())
            .map(|bytes| String::from_utf8(bytes).unwrap())
    }

    fn modified(&self, path: &str) -> Option<SystemTime> {
        self.entries.lock().unwrap().get(path).and_then(|(_, m)| *m)
    }

    fn contains(&self, path: &str) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }

    fn paths(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }

    fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }
}

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

fn within(scope: &str, path: &str) -> bool {
    scope.is_empty() || path == scope || path.starts_with(&format!("{}/", scope))
}

impl ContentSite for MemorySite {
    fn root(&self) -> String {
        self.name.to_string()
    }

    fn location(&self) -> Option<PathBuf> {
        None
    }

    fn enumerate(&self, scope: &str) -> SiteResult<Vec<SiteEntry>> {
        if !self.valid {
            return Err(SiteError::InvalidSite {
                root: self.name.to_string(),
                reason: "missing".to_string(),
            });
        }
        let entries = self.entries.lock().unwrap();
        if !scope.is_empty() && !entries.contains_key(scope) {
            return Err(SiteError::NotFound {
                path: scope.to_string(),
            });
        }
        Ok(entries
            .iter()
            .filter(|(path, _)| within(scope, path))
            .map(|(path, (content, modified))| match content {
                Some(bytes) => SiteEntry::file(path.clone(), bytes.len() as u64, *modified),
                None => SiteEntry::directory(path.clone()),
            })
            .collect())
    }

    fn read(&self, path: &str) -> SiteResult<Vec<u8>> {
        self.entries
            .lock()
            .unwrap()
            .get(path)
            .and_then(|(content, _)| content.clone())
            .ok_or_else(|| SiteError::NotFound {
                path: path.to_string(),
            })
    }

    fn write(&self, path: &str, content: &[u8], modified: Option<SystemTime>) -> SiteResult<()> {
        if let Some(parent) = content_path::parent(path) {
            self.create_dir(parent)?;
        }
        self.entries
            .lock()
            .unwrap()
            .insert(path.to_string(), (Some(content.to_vec()), modified));
        Ok(())
    }

    fn create_dir(&self, path: &str) -> SiteResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let mut current = Some(path);
        while let Some(dir) = current.filter(|d| !d.is_empty()) {
            entries.entry(dir.to_string()).or_insert((None, None));
            current = content_path::parent(dir);
        }
        Ok(())
    }

    fn delete(&self, path: &str) -> SiteResult<()> {
        self.entries
            .lock()
            .unwrap()
            .retain(|existing, _| !within(path, existing));
        Ok(())
    }

    fn checksum(&self, path: &str) -> SiteResult<crate::domain::value_objects::ContentHash> {
        *self.checksums.lock().unwrap() += 1;
        self.read(path)
            .map(|c| crate::domain::value_objects::ContentHash::from_bytes(&c))
    }

    fn trace(&self, event: &TraceEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn checksum_options() -> SyncOptions {
    SyncOptions::default()
}

fn timestamp_options() -> SyncOptions {
    SyncOptions {
        use_checksum: false,
        ..SyncOptions::default()
    }
}

#[test]
fn copies_everything_into_empty_target() {
    let source = MemorySite::new("src")
        .with_file("index.html", "<html>", 10)
        .with_file("css/site.css", "body{}", 10)
        .with_dir("empty");
    let target = MemorySite::new("dst");

    let summary = TreeSyncEngine::new()
        .synchronize(&source, &target, &checksum_options(), &[])
        .unwrap();

    assert_eq!(summary.added, 4); // css, css/site.css, empty, index.html
    assert_eq!(target.content("css/site.css").as_deref(), Some("body{}"));
    assert!(target.contains("empty"));
    assert_eq!(target.modified("index.html"), Some(at(10)));
}

#[test]
fn removes_extraneous_target_entries() {
    let source = MemorySite::new("src").with_file("keep.txt", "k", 1);
    let target = MemorySite::new("dst")
        .with_file("keep.txt", "k", 1)
        .with_file("old/a.txt", "a", 1)
        .with_file("old/b/c.txt", "c", 1);

    let summary = TreeSyncEngine::new()
        .synchronize(&source, &target, &checksum_options(), &[])
        .unwrap();

    assert_eq!(target.paths(), ["keep.txt"]);
    assert_eq!(summary.deleted, 4); // old, old/a.txt, old/b, old/b/c.txt
    assert_eq!(summary.unchanged, 1);

    let deletions: Vec<_> = target
        .messages()
        .into_iter()
        .filter(|m| m.starts_with("Deleting"))
        .collect();
    assert_eq!(deletions.last().map(String::as_str), Some("Deleting (old)"));
}

#[test]
fn do_not_delete_keeps_extraneous_entries() {
    let source = MemorySite::new("src").with_file("a.txt", "a", 1);
    let target = MemorySite::new("dst").with_file("stale.txt", "s", 1);
    let options = SyncOptions {
        do_not_delete: true,
        ..SyncOptions::default()
    };

    let summary = TreeSyncEngine::new()
        .synchronize(&source, &target, &options, &[])
        .unwrap();

    assert_eq!(summary.deleted, 0);
    assert!(target.contains("stale.txt"));
    assert!(target.contains("a.txt"));
}

#[test]
fn checksum_mode_detects_same_size_changes() {
    let source = MemorySite::new("src").with_file("a.txt", "new", 5);
    let target = MemorySite::new("dst").with_file("a.txt", "old", 5);

    let summary = TreeSyncEngine::new()
        .synchronize(&source, &target, &checksum_options(), &[])
        .unwrap();

    assert_eq!(summary.updated, 1);
    assert_eq!(target.content("a.txt").as_deref(), Some("new"));
}

#[test]
fn timestamp_mode_trusts_size_and_mtime() {
    let source = MemorySite::new("src").with_file("a.txt", "new", 5);
    let target = MemorySite::new("dst").with_file("a.txt", "old", 5);

    let summary = TreeSyncEngine::new()
        .synchronize(&source, &target, &timestamp_options(), &[])
        .unwrap();

    assert_eq!(summary.unchanged, 1);
    assert_eq!(target.content("a.txt").as_deref(), Some("old"));
    assert_eq!(*source.checksums.lock().unwrap(), 0);
}

#[test]
fn timestamp_mode_updates_on_mtime_change() {
    let source = MemorySite::new("src").with_file("a.txt", "new", 9);
    let target = MemorySite::new("dst").with_file("a.txt", "old", 5);

    let summary = TreeSyncEngine::new()
        .synchronize(&source, &target, &timestamp_options(), &[])
        .unwrap();

    assert_eq!(summary.updated, 1);
    assert_eq!(target.modified("a.txt"), Some(at(9)));
}

#[test]
fn size_change_skips_checksum() {
    let source = MemorySite::new("src").with_file("a.txt", "longer", 1);
    let target = MemorySite::new("dst").with_file("a.txt", "s", 1);

    TreeSyncEngine::new()
        .synchronize(&source, &target, &checksum_options(), &[])
        .unwrap();

    assert_eq!(*source.checksums.lock().unwrap(), 0);
    assert_eq!(target.content("a.txt").as_deref(), Some("longer"));
}

#[test]
fn path_filters_restrict_scope() {
    let source = MemorySite::new("src")
        .with_file("images/logo.png", "png", 1)
        .with_file("css/site.css", "css", 1)
        .with_file("scripts/app.js", "js", 1);
    let target = MemorySite::new("dst").with_file("scripts/legacy.js", "old", 1);
    let paths = vec!["images".to_string(), "/css/site.css".to_string()];

    TreeSyncEngine::new()
        .synchronize(&source, &target, &checksum_options(), &paths)
        .unwrap();

    assert!(target.contains("images/logo.png"));
    assert!(target.contains("css/site.css"));
    assert!(!target.contains("scripts/app.js"));
    // Outside every filter, so left alone
    assert!(target.contains("scripts/legacy.js"));
}

#[test]
fn missing_source_filter_fails_before_writing() {
    let source = MemorySite::new("src").with_file("images/a.png", "a", 1);
    let target = MemorySite::new("dst");
    let paths = vec!["images".to_string(), "missing".to_string()];

    let err = TreeSyncEngine::new()
        .synchronize(&source, &target, &checksum_options(), &paths)
        .unwrap_err();

    assert!(matches!(err, SiteError::NotFound { ref path } if path == "missing"));
    assert!(target.paths().is_empty());
}

#[test]
fn invalid_source_site_fails() {
    let source = MemorySite::invalid("src");
    let target = MemorySite::new("dst");

    let err = TreeSyncEngine::new()
        .synchronize(&source, &target, &checksum_options(), &[])
        .unwrap_err();

    assert!(matches!(err, SiteError::InvalidSite { .. }));
}

#[test]
fn escaping_filter_is_rejected() {
    let source = MemorySite::new("src");
    let target = MemorySite::new("dst");

    let err = TreeSyncEngine::new()
        .synchronize(&source, &target, &checksum_options(), &["../etc".to_string()])
        .unwrap_err();

    assert!(matches!(err, SiteError::PathEscape { .. }));
}

#[test]
fn directory_replaced_by_file() {
    let source = MemorySite::new("src").with_file("media", "now a file", 1);
    let target = MemorySite::new("dst")
        .with_file("media/a.png", "a", 1)
        .with_file("media/b.png", "b", 1);

    let summary = TreeSyncEngine::new()
        .synchronize(&source, &target, &checksum_options(), &[])
        .unwrap();

    assert_eq!(target.paths(), ["media"]);
    assert_eq!(target.content("media").as_deref(), Some("now a file"));
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.deleted, 0);

    let messages = target.messages();
    let deleting = messages.iter().position(|m| m == "Deleting (media)");
    let adding = messages.iter().position(|m| m == "Adding file (media)");
    assert!(deleting.is_some(), "{:?}", messages);
    assert!(deleting < adding, "{:?}", messages);
}

#[test]
fn file_replaced_by_directory_traces_deletion() {
    let source = MemorySite::new("src").with_file("media/a.png", "a", 1);
    let target = MemorySite::new("dst").with_file("media", "was a file", 1);

    TreeSyncEngine::new()
        .synchronize(&source, &target, &checksum_options(), &[])
        .unwrap();

    assert_eq!(target.content("media/a.png").as_deref(), Some("a"));
    let messages = target.messages();
    assert!(messages.iter().any(|m| m == "Deleting (media)"), "{:?}", messages);
    assert!(messages.iter().any(|m| m == "Adding directory (media)"), "{:?}", messages);
}

#[test]
fn traces_reach_both_sites() {
    let source = MemorySite::new("src").with_file("a.txt", "a", 1);
    let target = MemorySite::new("dst");

    TreeSyncEngine::new()
        .synchronize(&source, &target, &checksum_options(), &[])
        .unwrap();

    let source_messages = source.messages();
    assert_eq!(source_messages[0], "Synchronizing src to dst");
    assert!(source_messages.iter().any(|m| m == "Enumerating source (/)"));

    let target_events = target.events.lock().unwrap();
    assert!(target_events
        .iter()
        .any(|e| e.level == TraceLevel::Info && e.message == "Adding file (a.txt)"));
    let last = target_events.last().unwrap();
    assert_eq!(last.data["added"], 1);
}
