//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod content_site;
pub mod remote_transport;
pub mod site_resolver;
pub mod sync_engine;
pub mod trace_sink;

pub use content_site::{ContentSite, EntryKind, SiteEntry, SiteError, SiteResult};
pub use remote_transport::{CommandOutput, RemoteTransport};
pub use site_resolver::SiteResolver;
pub use sync_engine::{SyncEngine, SyncSummary};
pub use trace_sink::{NoopTraceSink, TraceSink};
