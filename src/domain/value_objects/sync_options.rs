//! Synchronization options attached to every runner

use serde::Serialize;

/// Options governing one synchronization run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncOptions {
    /// Keep destination entries that no longer exist on the source
    pub do_not_delete: bool,
    /// Compare content by checksum instead of size and modification time
    pub use_checksum: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            do_not_delete: false,
            use_checksum: true,
        }
    }
}

impl SyncOptions {
    /// Options used by deployment runners: extraneous files are always removed
    pub fn for_deployment(use_checksum: bool) -> Self {
        Self {
            do_not_delete: false,
            use_checksum,
        }
    }
}
