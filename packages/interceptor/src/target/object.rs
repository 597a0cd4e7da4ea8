// packages/interceptor/src/target/object.rs
//! Dynamic property-bag target
//!
//! [`Object`] maps a caller-chosen key type to dynamically typed [`Value`]s,
//! including callable values, so any object shape can be intercepted without
//! writing a [`Target`] implementation by hand.

use crate::target::{Callable, Method, Target};
use crate::utils::errors::{InterceptorError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;

/// Dynamically typed property value
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// Callable value; shared rather than copied when the value is cloned
    Method(Method<Value>),
}

impl Value {
    /// Create a callable value
    pub fn method<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Value::Method(Arc::new(f))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self, Value::Method(_))
    }
}

impl Callable for Value {
    fn as_method(&self) -> Option<Method<Self>> {
        match self {
            Value::Method(method) => Some(Arc::clone(method)),
            _ => None,
        }
    }

    fn from_method(method: Method<Self>) -> Self {
        Value::Method(method)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Method(_) => write!(f, "Method(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // Methods compare by identity
            (Value::Method(a), Value::Method(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Property bag keyed by `K`
#[derive(Clone)]
pub struct Object<K> {
    properties: HashMap<K, Value>,
}

impl<K: Eq + Hash> Object<K> {
    pub fn new() -> Self {
        Self {
            properties: HashMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: K, value: impl Into<Value>) -> Self {
        self.properties.insert(key, value.into());
        self
    }

    pub fn insert(&mut self, key: K, value: impl Into<Value>) -> Option<Value> {
        self.properties.insert(key, value.into())
    }

    pub fn remove(&mut self, key: &K) -> Option<Value> {
        self.properties.remove(key)
    }

    pub fn property(&self, key: &K) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.properties.keys()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K: Eq + Hash + FromStr> Object<K> {
    /// Build an object from a JSON object literal, parsing each member name
    /// into a key.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(map) = json else {
            return Err(InterceptorError::InvalidTarget(
                "expected a JSON object".to_string(),
            ));
        };

        let mut object = Self::new();
        for (name, value) in map {
            let key = name.parse::<K>().map_err(|_| {
                InterceptorError::InvalidTarget(format!("unknown property `{}`", name))
            })?;
            object.properties.insert(key, Value::from(value));
        }

        Ok(object)
    }
}

impl<K: Eq + Hash> Default for Object<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> FromIterator<(K, Value)> for Object<K> {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Object<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.properties.iter()).finish()
    }
}

impl<K> Target for Object<K>
where
    K: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    type Key = K;
    type Value = Value;

    fn contains_key(&self, key: &K) -> bool {
        self.properties.contains_key(key)
    }

    fn get(&self, key: &K) -> Option<Value> {
        self.properties.get(key).cloned()
    }

    fn set(&mut self, key: &K, value: Value) {
        self.properties.insert(key.clone(), value);
    }
}
