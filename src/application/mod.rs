//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PublishDispatcher` - Runs the applicable deployment tasks after a publish
//! - `RunnerFactory` - Builds a `DeploymentRunner` from a task definition

pub mod dispatcher;
pub mod runner;

pub use dispatcher::{
    DispatchOutcome, DispatchReport, DispatcherState, PendingDispatch, PublishDispatcher,
    TaskOutcome, TaskStatus,
};
pub use runner::{DeploymentRunner, RunnerFactory};
