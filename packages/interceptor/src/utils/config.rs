// packages/interceptor/src/utils/config.rs
//! Interceptor configuration
//!
//! Settings are layered from an optional YAML/TOML/JSON file and
//! `INTERCEPTOR_*` environment variables, e.g.:
//!
//! ```text
//! INTERCEPTOR_FREEZE=true
//! INTERCEPTOR_LOGGING__FORMAT=json
//! ```

use crate::utils::errors::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "interceptor.yaml";
/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "INTERCEPTOR_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "INTERCEPTOR";
/// Environment variable overriding the log filter.
pub const LOG_ENV_VAR: &str = "INTERCEPTOR_LOG";

/// Interceptor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptorConfig {
    /// Give each interceptor a private deep copy of its target
    pub freeze: bool,

    /// Log output settings
    pub logging: LoggingConfig,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            freeze: false,
            logging: LoggingConfig::default(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `INTERCEPTOR_LOG` is unset
    pub filter: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl InterceptorConfig {
    /// Load configuration from the file named by `INTERCEPTOR_CONFIG`
    /// (falling back to `interceptor.yaml`, which may be absent) and the
    /// environment.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        debug!("Loading interceptor configuration from {}", path);

        Self::build(config::File::with_name(&path).required(false))
    }

    /// Load configuration from a specific file; the file must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading interceptor configuration from {:?}", path);

        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
