//! Tracing subscriber setup shared by the GUI and CLI.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `filter` (e.g. `"info"` or
/// `"estimate_core=debug"`) is used. Output goes to stderr so CLI reports on
/// stdout stay clean. Calling this twice is harmless.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init();

    if installed.is_ok() {
        tracing::debug!(filter, "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init("debug");
        init("not a valid [filter");
        tracing::info!("still logging");
    }
}
