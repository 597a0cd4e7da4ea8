// packages/interceptor/src/observability.rs
//! Logging setup
//!
//! The library only emits `tracing` events and `metrics` counters; binaries
//! and tests decide whether to install a subscriber or a metrics recorder.
//!
//! Counters emitted:
//! - `interceptor_accesses_total{operation, route}` - Façade accesses
//! - `interceptor_refused_writes_total` - Writes refused for lack of a setter

use crate::utils::config::{LogFormat, LoggingConfig, LOG_ENV_VAR};
use crate::utils::errors::{InterceptorError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `INTERCEPTOR_LOG` takes precedence over the configured filter. Fails if a
/// global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };

    result.map_err(|e| InterceptorError::ConfigError(format!("failed to install tracing subscriber: {}", e)))
}
