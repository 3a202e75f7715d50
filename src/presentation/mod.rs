//! Presentation Layer
//!
//! This layer handles:
//! - Creating the dispatcher with infrastructure dependencies
//!
//! ## Usage
//!
//! ```ignore
//! use webdeploy::presentation::factory;
//!
//! let dispatcher = factory::create_dispatcher(&config)?;
//! dispatcher.on_publish_completed(&context)?;
//! ```

pub mod factory;

pub use factory::{create_dispatcher, create_dispatcher_with_sink};
