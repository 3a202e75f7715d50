//! Terminal output for CLI commands

pub mod json;
pub mod output;
