//! Relative content paths
//!
//! Every site addresses entries by a `/`-separated path relative to its root,
//! so a folder on Windows, a local application and a POSIX remote host agree
//! on entry identity. The empty string names the root itself.

use crate::domain::ports::SiteError;

/// Normalize a path filter or entry path into its canonical relative form.
///
/// Backslashes become `/`, `.` segments and empty segments are dropped, and
/// leading or trailing separators are removed. `..` segments are rejected.
pub fn normalize(path: &str) -> Result<String, SiteError> {
    let unified = path.replace('\\', "/");
    let mut segments = Vec::new();

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(SiteError::PathEscape {
                    path: path.to_string(),
                })
            }
            other => segments.push(other),
        }
    }

    Ok(segments.join("/"))
}

/// Join a child name onto a normalized relative path
pub fn join(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", parent, child)
    }
}

/// Parent of a normalized relative path; the root has none
pub fn parent(path: &str) -> Option<&str> {
    if path.is_empty() {
        return None;
    }
    Some(path.rsplit_once('/').map_or("", |(parent, _)| parent))
}
