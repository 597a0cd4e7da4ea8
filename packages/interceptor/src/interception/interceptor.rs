// packages/interceptor/src/interception/interceptor.rs
//! Interceptor engine
//!
//! Owns a target, an interception table and the façade. Every façade
//! access first resolves a [`Route`] (checking the lifecycle tag, then the
//! table) and only then touches the record or the raw target.

use crate::interception::facade::Facade;
use crate::interception::record::{Delegate, Interception, MethodInterception};
use crate::interception::table::InterceptionTable;
use crate::target::{Callable, Method, Target, TargetRef};
use crate::utils::config::InterceptorConfig;
use crate::utils::errors::{InterceptorError, Result};
use metrics::counter;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Interceptor lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Records are consulted on every access
    Active,

    /// Terminal; all accesses operate on the retained target only
    Disposed,
}

/// Lifecycle tag and table, guarded together so disposal is atomic with
/// respect to routing.
struct State<T: Target> {
    lifecycle: Lifecycle,
    table: InterceptionTable<T>,
}

/// How a single access is served
pub(crate) enum Route<T: Target> {
    /// Interceptor disposed; raw target access
    Bypassed,

    /// No record governs the key; raw target access
    Fallthrough,

    /// A record governs the key
    Intercepted(Interception<T>),
}

impl<T: Target> Route<T> {
    fn label(&self) -> &'static str {
        match self {
            Route::Bypassed => "bypassed",
            Route::Fallthrough => "fallthrough",
            Route::Intercepted(_) => "intercepted",
        }
    }
}

/// Result of routing a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteOutcome {
    /// Written straight onto the target
    Applied,

    /// Handed to the record's setter
    Intercepted,

    /// Governed by a record without a setter; nothing was written
    Suppressed,
}

/// Engine state shared between an interceptor and its façade
pub(crate) struct Shared<T: Target> {
    target: TargetRef<T>,
    state: RwLock<State<T>>,
}

impl<T: Target> Shared<T> {
    /// Resolve the route for `key`. The record is cloned out so no lock is
    /// held while user callbacks run.
    fn route(&self, key: &T::Key) -> Route<T> {
        let state = self.state.read();
        match state.lifecycle {
            Lifecycle::Disposed => Route::Bypassed,
            Lifecycle::Active => match state.table.get(key) {
                Some(interception) => Route::Intercepted(interception.clone()),
                None => Route::Fallthrough,
            },
        }
    }

    pub(crate) fn exists(&self, key: &T::Key) -> bool {
        let route = self.route(key);
        record_access("exists", &route);
        trace!("exists {:?} via {}", key, route.label());

        match route {
            Route::Bypassed | Route::Fallthrough => self.target.contains_key(key),
            Route::Intercepted(interception) => interception.exists(&self.target, key),
        }
    }

    pub(crate) fn read(&self, key: &T::Key) -> Option<T::Value> {
        let route = self.route(key);
        record_access("read", &route);
        trace!("read {:?} via {}", key, route.label());

        match route {
            Route::Intercepted(Interception { get: Some(get), .. }) => Some(get(&self.target, key)),
            // Records without a getter fall through, including write-only ones
            _ => self.target.get(key),
        }
    }

    pub(crate) fn write(&self, key: &T::Key, value: T::Value) -> WriteOutcome {
        let route = self.route(key);
        record_access("write", &route);
        trace!("write {:?} via {}", key, route.label());

        match route {
            Route::Bypassed | Route::Fallthrough => {
                self.target.set(key, value);
                WriteOutcome::Applied
            }
            Route::Intercepted(Interception { set: Some(set), .. }) => {
                set(&self.target, key, value);
                WriteOutcome::Intercepted
            }
            Route::Intercepted(_) => WriteOutcome::Suppressed,
        }
    }

    pub(crate) fn target(&self) -> &TargetRef<T> {
        &self.target
    }
}

fn record_access<T: Target>(operation: &'static str, route: &Route<T>) {
    counter!(
        "interceptor_accesses_total",
        "operation" => operation,
        "route" => route.label()
    )
    .increment(1);
}

/// Intercepts property reads, writes and existence checks on a target.
///
/// # Example
///
/// ```
/// use facade_interceptor::{Interception, Interceptor, Object, TargetRef, Value};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Field {
///     A,
/// }
///
/// let target = TargetRef::new(Object::new().with(Field::A, 5));
/// let interceptor = Interceptor::new(target.clone());
///
/// interceptor
///     .add_property(Field::A, Interception::getter(|_, _| Value::Int(10)))
///     .unwrap();
///
/// assert_eq!(interceptor.proxy().read(&Field::A), Some(Value::Int(10)));
/// assert_eq!(target.get(&Field::A), Some(Value::Int(5)));
/// ```
pub struct Interceptor<T: Target> {
    shared: Arc<Shared<T>>,

    /// Created once; handed out by reference for a stable identity
    facade: Facade<T>,
}

impl<T: Target> Interceptor<T> {
    /// Create an interceptor over a shared target. Changes made to the
    /// target through other handles are visible through the façade.
    pub fn new(target: TargetRef<T>) -> Self {
        Self::from_target(target, false)
    }

    fn from_target(target: TargetRef<T>, frozen: bool) -> Self {
        let shared = Arc::new(Shared {
            target,
            state: RwLock::new(State {
                lifecycle: Lifecycle::Active,
                table: InterceptionTable::new(),
            }),
        });
        let facade = Facade::new(Arc::clone(&shared));

        debug!(frozen, "Created interceptor");

        Self { shared, facade }
    }

    /// The backing target
    pub fn target(&self) -> &TargetRef<T> {
        self.shared.target()
    }

    /// Snapshot of the installed interceptions
    pub fn interceptions(&self) -> HashMap<T::Key, Interception<T>> {
        self.shared.state.read().table.snapshot()
    }

    /// The façade routing accesses through this interceptor
    pub fn proxy(&self) -> &Facade<T> {
        &self.facade
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.shared.state.read().lifecycle
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle() == Lifecycle::Disposed
    }

    /// Install a property interception.
    ///
    /// Fails if a record already governs `key` (delete it first) or the
    /// interceptor is disposed.
    pub fn add_property(&self, key: T::Key, interception: Interception<T>) -> Result<()> {
        let mut state = self.shared.state.write();

        if state.lifecycle == Lifecycle::Disposed {
            warn!("Rejected interception for {:?}: interceptor is disposed", key);
            return Err(InterceptorError::Disposed(format!("{:?}", key)));
        }

        if state.table.contains_key(&key) {
            return Err(InterceptorError::DuplicateKey(format!("{:?}", key)));
        }

        debug!("Adding interception for {:?}", key);
        state.table.set(key, interception);
        Ok(())
    }

    /// Remove the interception for `key`, restoring fallthrough
    pub fn delete(&self, key: &T::Key) {
        self.shared.state.write().table.delete(key);
    }

    /// Remove all interceptions
    pub fn clear(&self) {
        let mut state = self.shared.state.write();
        debug!("Clearing {} interceptions", state.table.len());
        state.table.clear();
    }

    /// Permanently disable interception. Repeated calls have no effect.
    pub fn dispose(&self) {
        let mut state = self.shared.state.write();
        if state.lifecycle == Lifecycle::Disposed {
            return;
        }

        state.lifecycle = Lifecycle::Disposed;
        state.table.clear();
        info!("Interceptor disposed");
    }
}

impl<T: Target> fmt::Debug for Interceptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.read();
        f.debug_struct("Interceptor")
            .field("lifecycle", &state.lifecycle)
            .field("interceptions", &state.table)
            .finish()
    }
}

impl<T: Target> Interceptor<T>
where
    T::Value: Callable,
{
    /// Intercept the method stored under `key`.
    ///
    /// Reading `key` through the façade yields a method that forwards the
    /// target, the original method and the call arguments to `handler`. The
    /// original is looked up on each call, so replacing it on the target is
    /// observed by the handler.
    pub fn add_method<F>(&self, key: T::Key, handler: F) -> Result<()>
    where
        F: Fn(&TargetRef<T>, &Delegate<T::Value>, &[T::Value]) -> Result<T::Value>
            + Send
            + Sync
            + 'static,
    {
        let handler: MethodInterception<T> = Arc::new(handler);

        let interception = Interception::getter(move |target: &TargetRef<T>, key: &T::Key| {
            let target = target.clone();
            let key = key.clone();
            let handler = Arc::clone(&handler);

            let method: Method<T::Value> = Arc::new(move |args: &[T::Value]| {
                let original = target.get(&key).and_then(|value| value.as_method());
                let delegate = Delegate::new(format!("{:?}", key), original);
                handler(&target, &delegate, args)
            });

            T::Value::from_method(method)
        });

        self.add_property(key, interception)
    }
}

impl<T: Target + Clone> Interceptor<T> {
    /// Create an interceptor over a private deep copy of `target`. Later
    /// changes to the original are never observed through the façade.
    pub fn frozen(target: &TargetRef<T>) -> Self {
        Self::from_target(target.deep_clone(), true)
    }

    pub fn with_freeze(target: TargetRef<T>, freeze: bool) -> Self {
        if freeze {
            Self::frozen(&target)
        } else {
            Self::new(target)
        }
    }

    pub fn from_config(target: TargetRef<T>, config: &InterceptorConfig) -> Self {
        Self::with_freeze(target, config.freeze)
    }
}
