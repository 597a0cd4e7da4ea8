// packages/interceptor/src/lib.rs
//! Facade Interceptor Library
//!
//! Transparent interception of property reads, writes and existence checks
//! on arbitrary targets, with method wrapping that keeps access to the
//! wrapped method and the call arguments.
//!
//! # Architecture
//!
//! The library is structured into several key modules:
//!
//! - **target**: Backing targets, shared handles and the dynamic `Object`
//! - **interception**: Records, table, interceptor engine and façade
//! - **observability**: Tracing setup
//! - **utils**: Errors and configuration
//!
//! # Example
//!
//! ```
//! use facade_interceptor::{Interception, Interceptor, Object, TargetRef, Value};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Field {
//!     A,
//!     X,
//! }
//!
//! let target = TargetRef::new(
//!     Object::new()
//!         .with(Field::A, 5)
//!         .with(Field::X, Value::method(|_| Ok(Value::Int(198)))),
//! );
//! let interceptor = Interceptor::new(target);
//!
//! interceptor.add_property(Field::A, Interception::getter(|_, _| Value::Int(10)))?;
//! interceptor.add_method(Field::X, |_, original, args| {
//!     let value = original.call(args)?;
//!     Ok(Value::Int(value.as_i64().unwrap_or_default() + 2))
//! })?;
//!
//! let facade = interceptor.proxy();
//! assert_eq!(facade.read(&Field::A), Some(Value::Int(10)));
//! assert!(facade.exists(&Field::A));
//! assert_eq!(facade.invoke(&Field::X, &[])?, Value::Int(200));
//! # Ok::<(), facade_interceptor::InterceptorError>(())
//! ```

// Public module exports
pub mod interception;
pub mod observability;
pub mod target;
pub mod utils;

// Re-export commonly used types
pub use interception::{Delegate, Facade, Interception, InterceptionTable, Interceptor, Lifecycle};
pub use target::{Callable, Method, Object, Target, TargetRef, Value};
pub use utils::config::InterceptorConfig;
pub use utils::errors::{InterceptorError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
