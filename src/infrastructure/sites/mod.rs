//! Content site implementations
//!
//! Concrete ContentSite endpoints plus the environment that assembles them
//! from site descriptions.

mod environment;
mod folder;
mod local_app;
mod remote;
mod traced;

pub use environment::SiteEnvironment;
pub use folder::FolderSite;
pub use local_app::LocalApplicationSite;
pub use remote::RemoteSite;
pub use traced::TracedSite;
