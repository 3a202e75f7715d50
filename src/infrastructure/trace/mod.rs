//! Trace sinks

mod log;

pub use log::LogTraceSink;
