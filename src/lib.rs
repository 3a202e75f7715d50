//! WebDeploy - publish-triggered content deployment
//!
//! When the content pipeline finishes a publish, the dispatcher runs every
//! registered deployment task that applies to the published database. Each
//! task mirrors a source tree (a folder, or the running application) onto a
//! local or remote target folder.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    DispatchOutcome, DispatchReport, DispatcherState, PublishDispatcher, RunnerFactory,
    TaskStatus,
};
pub use config::Config;
pub use domain::entities::TaskDefinition;
pub use domain::value_objects::{PublishContext, PublishMode, PublishPayload, RunContext};
pub use error::{WebDeployError, WebDeployResult};
