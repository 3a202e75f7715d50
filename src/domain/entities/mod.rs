//! Domain Entities
//!
//! Task definitions and the site descriptions built from them.

mod decorator;
mod site;
mod task_definition;

pub use decorator::{Decorator, RemoteDecorator, TraceDecorator};
pub use site::{Site, SiteKind};
pub use task_definition::TaskDefinition;
