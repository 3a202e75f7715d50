//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

pub mod content_path;
mod hash;
mod publish_context;
mod sync_options;
mod trace_event;

pub use hash::ContentHash;
pub use publish_context::{PublishContext, PublishMode, PublishPayload, RunContext};
pub use sync_options::SyncOptions;
pub use trace_event::{TraceEvent, TraceLevel};
