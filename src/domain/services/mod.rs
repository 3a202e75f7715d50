//! Domain Services
//!
//! Stateless algorithms that operate on domain ports.

pub mod tree_sync;

pub use tree_sync::TreeSyncEngine;
