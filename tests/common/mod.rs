//! Common test utilities for WebDeploy integration tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated test environment with a temp directory and CLI helpers
//! - Fixtures: content trees, config snippets and recording trace sinks

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
