// packages/interceptor/src/interception/facade.rs
//! The façade callers use in place of the target
//!
//! Exposes exactly three proxied operations (existence check, read and
//! write) plus method invocation for callable values. Structural operations
//! such as iteration are not proxied.

use crate::interception::interceptor::{Shared, WriteOutcome};
use crate::target::{Callable, Target};
use crate::utils::errors::{InterceptorError, Result};
use metrics::counter;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Façade over an intercepted target.
///
/// Clones route through the same interceptor.
pub struct Facade<T: Target> {
    shared: Arc<Shared<T>>,
}

impl<T: Target> Facade<T> {
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        Self { shared }
    }

    /// Whether `key` is reported present
    pub fn exists(&self, key: &T::Key) -> bool {
        self.shared.exists(key)
    }

    /// Read `key`; `None` when it resolves to an absent target property
    pub fn read(&self, key: &T::Key) -> Option<T::Value> {
        self.shared.read(key)
    }

    /// Write `key`.
    ///
    /// Fails with [`InterceptorError::RefusedWrite`] when the key is
    /// governed by a record without a setter; nothing is written then.
    pub fn write(&self, key: &T::Key, value: T::Value) -> Result<()> {
        match self.shared.write(key, value) {
            WriteOutcome::Applied | WriteOutcome::Intercepted => Ok(()),
            WriteOutcome::Suppressed => {
                counter!("interceptor_refused_writes_total").increment(1);
                debug!("Refused write to {:?}", key);
                Err(InterceptorError::RefusedWrite(format!("{:?}", key)))
            }
        }
    }

    /// Whether both façades route through the same interceptor
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T: Target> Facade<T>
where
    T::Value: Callable,
{
    /// Read `key` through interception and call the resulting method
    pub fn invoke(&self, key: &T::Key, args: &[T::Value]) -> Result<T::Value> {
        let method = self
            .read(key)
            .and_then(|value| value.as_method())
            .ok_or_else(|| InterceptorError::NotCallable(format!("{:?}", key)))?;

        method(args)
    }
}

impl<T: Target> Clone for Facade<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Target> fmt::Debug for Facade<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facade").finish_non_exhaustive()
    }
}
