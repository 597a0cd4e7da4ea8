// packages/interceptor/src/utils/mod.rs
//! Shared utilities
//!
//! - **errors**: Error taxonomy and the crate-wide `Result` alias
//! - **config**: Interceptor configuration loading

pub mod config;
pub mod errors;

pub use self::config::{InterceptorConfig, LogFormat, LoggingConfig};
pub use self::errors::{InterceptorError, Result};
