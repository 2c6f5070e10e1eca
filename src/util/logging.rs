use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Route import and catalog logs to stderr so stdout carries only command
/// output (the summary, `--json` documents, `list` lines).
///
/// `default_filter` is `info`, or `debug` under `--verbose`, and only applies
/// when `RUST_LOG` is unset. Per-row skip and update events log at debug.
/// Fails if a subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<(), anyhow::Error> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}
