// packages/interceptor/src/utils/errors.rs
//! Error types for the interception engine

use thiserror::Error;

/// Errors raised by interceptors, façades and targets.
///
/// Keys are carried in their `Debug` rendering so the error type stays
/// independent of any particular target's key type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterceptorError {
    /// A record already governs the key; delete it before adding another.
    #[error("An interception with the key `{0}` already exists")]
    DuplicateKey(String),

    /// Write to a key whose record defines no setter.
    #[error("Property `{0}` is intercepted without a setter and cannot be written")]
    RefusedWrite(String),

    #[error("Property `{0}` is not callable")]
    NotCallable(String),

    /// Registration attempted after the interceptor was disposed.
    #[error("Interceptor is disposed, cannot intercept `{0}`")]
    Disposed(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Raised by user-supplied methods and method interceptions.
    #[error("Invocation failed: {0}")]
    InvocationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for InterceptorError {
    fn from(err: config::ConfigError) -> Self {
        InterceptorError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InterceptorError>;
