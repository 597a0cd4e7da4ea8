// packages/interceptor/src/interception/record.rs
//! Interception records
//!
//! A record governs a single key and carries up to three optional
//! behaviors: an existence check, a getter and a setter. Every behavior
//! receives the interceptor's [`TargetRef`], never a held lock.

use crate::target::{Method, Target, TargetRef};
use crate::utils::errors::{InterceptorError, Result};
use std::fmt;
use std::sync::Arc;

/// Decides whether a key is reported present.
pub type ExistenceChecker<T> =
    Arc<dyn Fn(&TargetRef<T>, &<T as Target>::Key) -> bool + Send + Sync>;

/// Resolves the value read through the façade.
pub type PropertyGetter<T> =
    Arc<dyn Fn(&TargetRef<T>, &<T as Target>::Key) -> <T as Target>::Value + Send + Sync>;

/// Receives values written through the façade. The setter alone decides
/// whether and how the target is mutated.
pub type PropertySetter<T> =
    Arc<dyn Fn(&TargetRef<T>, &<T as Target>::Key, <T as Target>::Value) + Send + Sync>;

/// Replaces a method; receives the target, the original method and the
/// call arguments.
pub type MethodInterception<T> = Arc<
    dyn Fn(
            &TargetRef<T>,
            &Delegate<<T as Target>::Value>,
            &[<T as Target>::Value],
        ) -> Result<<T as Target>::Value>
        + Send
        + Sync,
>;

/// Interception of a single property
pub struct Interception<T: Target> {
    /// Existence override
    pub has: Option<ExistenceChecker<T>>,

    /// Read override
    pub get: Option<PropertyGetter<T>>,

    /// Write override
    pub set: Option<PropertySetter<T>>,
}

impl<T: Target> Interception<T> {
    /// Record with no behaviors. Such a record hides its key and refuses
    /// writes, while reads still fall through to the target.
    pub fn new() -> Self {
        Self {
            has: None,
            get: None,
            set: None,
        }
    }

    /// Record with only a getter (read-only property)
    pub fn getter<F>(f: F) -> Self
    where
        F: Fn(&TargetRef<T>, &T::Key) -> T::Value + Send + Sync + 'static,
    {
        Self::new().with_get(f)
    }

    /// Record with only a setter (write-only property)
    pub fn setter<F>(f: F) -> Self
    where
        F: Fn(&TargetRef<T>, &T::Key, T::Value) + Send + Sync + 'static,
    {
        Self::new().with_set(f)
    }

    pub fn with_has<F>(mut self, f: F) -> Self
    where
        F: Fn(&TargetRef<T>, &T::Key) -> bool + Send + Sync + 'static,
    {
        self.has = Some(Arc::new(f));
        self
    }

    pub fn with_get<F>(mut self, f: F) -> Self
    where
        F: Fn(&TargetRef<T>, &T::Key) -> T::Value + Send + Sync + 'static,
    {
        self.get = Some(Arc::new(f));
        self
    }

    pub fn with_set<F>(mut self, f: F) -> Self
    where
        F: Fn(&TargetRef<T>, &T::Key, T::Value) + Send + Sync + 'static,
    {
        self.set = Some(Arc::new(f));
        self
    }

    /// Visibility without an explicit existence check: a getter or a setter
    /// makes the key visible.
    pub fn is_visible_by_default(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    /// Whether the governed key is reported present
    pub fn exists(&self, target: &TargetRef<T>, key: &T::Key) -> bool {
        match &self.has {
            Some(has) => has(target, key),
            None => self.is_visible_by_default(),
        }
    }
}

impl<T: Target> Default for Interception<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Target> Clone for Interception<T> {
    fn clone(&self) -> Self {
        Self {
            has: self.has.clone(),
            get: self.get.clone(),
            set: self.set.clone(),
        }
    }
}

impl<T: Target> fmt::Debug for Interception<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interception")
            .field("has", &self.has.is_some())
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .finish()
    }
}

/// The original method of an intercepted key, resolved from the target at
/// call time.
pub struct Delegate<V> {
    key: String,
    method: Option<Method<V>>,
}

impl<V> Delegate<V> {
    pub(crate) fn new(key: String, method: Option<Method<V>>) -> Self {
        Self { key, method }
    }

    /// Whether the target held a method under the key
    pub fn is_present(&self) -> bool {
        self.method.is_some()
    }

    pub fn method(&self) -> Option<&Method<V>> {
        self.method.as_ref()
    }

    /// Invoke the original method
    pub fn call(&self, args: &[V]) -> Result<V> {
        match &self.method {
            Some(method) => method(args),
            None => Err(InterceptorError::NotCallable(self.key.clone())),
        }
    }
}

impl<V> Clone for Delegate<V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            method: self.method.clone(),
        }
    }
}

impl<V> fmt::Debug for Delegate<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("key", &self.key)
            .field("present", &self.method.is_some())
            .finish()
    }
}
