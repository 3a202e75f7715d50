//! Deployment Runner
//!
//! Materializes a `TaskDefinition` into concrete sites and options, then
//! performs the copy.
//!
//! ## Structure
//!
//! - `factory` - Builds runners from task definitions (`RunnerFactory`)
//! - `deployment` - A single executable synchronization job (`DeploymentRunner`)

mod factory;
mod deployment;

pub use factory::RunnerFactory;
pub use deployment::DeploymentRunner;
