// packages/interceptor/src/interception/table.rs
//! Interception table mapping keys to their records
//!
//! A raw associative store: `set` overwrites and removals ignore missing
//! keys. Key uniqueness is enforced by the interceptor, not here.

use crate::interception::record::Interception;
use crate::target::Target;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Interception table
pub struct InterceptionTable<T: Target> {
    /// Key to record mapping
    interceptions: HashMap<T::Key, Interception<T>>,
}

impl<T: Target> InterceptionTable<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            interceptions: HashMap::new(),
        }
    }

    /// Exact lookup of the record governing `key`
    pub fn get(&self, key: &T::Key) -> Option<&Interception<T>> {
        self.interceptions.get(key)
    }

    /// Insert or replace the record for `key`
    pub fn set(&mut self, key: T::Key, interception: Interception<T>) {
        debug!("Setting interception for {:?}: {:?}", key, interception);
        self.interceptions.insert(key, interception);
    }

    /// Remove the record for `key`; missing keys are ignored
    pub fn delete(&mut self, key: &T::Key) {
        if self.interceptions.remove(key).is_some() {
            debug!("Removed interception for {:?}", key);
        }
    }

    /// Remove all records
    pub fn clear(&mut self) {
        self.interceptions.clear();
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.interceptions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.interceptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptions.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &T::Key> {
        self.interceptions.keys()
    }

    /// Point-in-time copy of all records
    pub fn snapshot(&self) -> HashMap<T::Key, Interception<T>> {
        self.interceptions.clone()
    }
}

impl<T: Target> Default for InterceptionTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Target> fmt::Debug for InterceptionTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.interceptions.iter()).finish()
    }
}
