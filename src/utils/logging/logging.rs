//! Tracing subscriber setup

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Filter directive for the configured level
///
/// `RUST_LOG` wins when set. Otherwise the configured level applies to this
/// crate and actix, with noisy HTTP internals capped at `warn`.
pub fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},hyper=warn,reqwest=warn,rustls=warn",
            level = config.level
        ))
    })
}

/// Install the global subscriber
///
/// Logs go to stderr so command output on stdout stays parseable. Calling
/// this twice is harmless: the second install attempt is ignored.
pub fn init_logging(config: &LoggingConfig) {
    let filter = build_env_filter(config);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.show_target)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Text => builder.compact().try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
