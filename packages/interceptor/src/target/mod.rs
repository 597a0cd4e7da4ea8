// packages/interceptor/src/target/mod.rs
//! Backing targets for interceptors
//!
//! A target is any object exposing three raw operations over a closed key
//! set: existence check, read and write. Interceptors route façade accesses
//! either to interception records or straight to these operations.
//!
//! - **Target**: The raw-access contract implemented per target shape
//! - **TargetRef**: Shared handle to a target (live mode shares it, frozen
//!   mode deep-copies it)
//! - **Callable**: Values that can carry a [`Method`]
//! - **Object**: Ready-made dynamic property bag keyed by any closed key type

pub mod object;

pub use object::{Object, Value};

use crate::utils::errors::Result;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Raw property access for a target shape.
///
/// Implement this for a struct with an enum of its field identifiers as
/// `Key`, or use [`Object`] for an open-ended property bag.
pub trait Target: Send + Sync + 'static {
    /// Identifier of a property
    type Key: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// Value stored under a property
    type Value: Clone + Send + Sync + 'static;

    /// Whether `key` is present on the target
    fn contains_key(&self, key: &Self::Key) -> bool;

    /// Raw read; `None` when the key is absent
    fn get(&self, key: &Self::Key) -> Option<Self::Value>;

    /// Raw write
    fn set(&mut self, key: &Self::Key, value: Self::Value);
}

/// A callable property value.
pub type Method<V> = Arc<dyn Fn(&[V]) -> Result<V> + Send + Sync>;

/// Value types able to carry a [`Method`].
pub trait Callable: Sized {
    /// The method stored in this value, if it is one
    fn as_method(&self) -> Option<Method<Self>>;

    /// Wrap a method into a value
    fn from_method(method: Method<Self>) -> Self;
}

/// Shared handle to a target.
///
/// Clones share the same underlying target. Locks are only held for the
/// duration of a single raw operation, so interception callbacks receiving
/// a `TargetRef` may re-enter it freely.
pub struct TargetRef<T> {
    inner: Arc<RwLock<T>>,
}

impl<T: Target> TargetRef<T> {
    pub fn new(target: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(target)),
        }
    }

    /// Borrow the target for reading
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read()
    }

    /// Borrow the target for writing
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner.write()
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.inner.read().contains_key(key)
    }

    pub fn get(&self, key: &T::Key) -> Option<T::Value> {
        self.inner.read().get(key)
    }

    pub fn set(&self, key: &T::Key, value: T::Value) {
        self.inner.write().set(key, value);
    }

    /// Whether both handles share the same target
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Target + Clone> TargetRef<T> {
    /// Copy the current state of the target into a new, unshared handle
    pub fn deep_clone(&self) -> Self {
        Self::new(self.inner.read().clone())
    }
}

impl<T> Clone for TargetRef<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Target> From<T> for TargetRef<T> {
    fn from(target: T) -> Self {
        Self::new(target)
    }
}

impl<T: fmt::Debug> fmt::Debug for TargetRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TargetRef").field(&*self.inner.read()).finish()
    }
}
