//! Reusable fixtures

use std::path::Path;
use std::sync::{Arc, Mutex};

use webdeploy::domain::ports::TraceSink;
use webdeploy::domain::value_objects::TraceEvent;

/// A small media tree
pub const MEDIA_TREE: &[(&str, &str)] = &[
    ("images/logo.png", "png-bytes"),
    ("images/icons/star.svg", "<svg/>"),
    ("css/site.css", "body { margin: 0 }"),
    ("index.html", "<html></html>"),
];

/// Create every `(path, content)` pair below `root`
pub fn seed_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let file = root.join(path);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(file, content).unwrap();
    }
}

/// Every file and directory below `root`, as sorted `/`-separated paths
pub fn list_tree(root: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let relative = path
                .strip_prefix(base)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            out.push(relative);
            if path.is_dir() {
                walk(base, &path, out);
            }
        }
    }

    let mut out = Vec::new();
    if root.exists() {
        walk(root, root, &mut out);
    }
    out.sort();
    out
}

/// Trace sink that keeps every event it receives
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<TraceEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_sink(&self) -> Arc<dyn TraceSink> {
        Arc::new(self.clone())
    }

    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|event| event.message.clone())
            .collect()
    }

    pub fn count(&self, message: &str) -> usize {
        self.messages().iter().filter(|m| *m == message).count()
    }
}

impl TraceSink for RecordingSink {
    fn on_trace(&self, event: &TraceEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// TOML for one local task
pub fn local_task_toml(name: &str, local_root: &Path, remote_root: &Path) -> String {
    format!(
        "[[tasks]]\nname = \"{}\"\nlocal_root = '{}'\nremote_root = '{}'\n",
        name,
        local_root.display(),
        remote_root.display()
    )
}
