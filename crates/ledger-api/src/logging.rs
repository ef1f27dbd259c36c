//! Tracing subscriber initialization.

use std::str::FromStr;
use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{LogConfig, LogFormat};
use crate::error::ApiError;

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` directives take precedence over the configured level. Fails
/// if the level is not a valid level name or a subscriber is already set.
pub fn init_tracing(config: &LogConfig) -> Result<(), ApiError> {
    let level = LevelFilter::from_str(&config.level)
        .map_err(|e| ApiError::Logging(format!("invalid level {:?}: {}", config.level, e)))?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(build_stdout_layer(config.format))
        .try_init()
        .map_err(|e| {
            ApiError::Logging(format!("failed to initialize tracing subscriber: {}", e))
        })
}

fn build_stdout_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
{
    let base = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    match format {
        LogFormat::Full => Box::new(base),
        LogFormat::Compact => Box::new(base.compact()),
        LogFormat::Json => Box::new(base.json()),
        LogFormat::Pretty => Box::new(base.pretty()),
    }
}

/// Initialize tracing for tests. Safe to call from every test.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::DEBUG.into())
            .from_env_lossy();

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
