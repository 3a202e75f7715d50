//! Logging setup
//!
//! Installs a `tracing-subscriber` fmt subscriber writing to stderr.
//! `WEBDEPLOY_LOG` takes an `EnvFilter` directive and overrides the level
//! derived from the `-v` count.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "WEBDEPLOY_LOG";

/// Default filter directive for a `-v` count
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging; a second call (or an embedding host's subscriber) wins silently
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(verbosity >= 2)
            .with_filter(filter),
    );

    if subscriber.try_init().is_err() {
        tracing::debug!("global tracing subscriber already initialized");
    }
}
