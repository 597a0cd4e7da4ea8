// packages/interceptor/src/interception/mod.rs
//! Property and method interception layer
//!
//! This module provides transparent interception of accesses to a target:
//!
//! - **Record**: Per-key bundle of optional existence/read/write overrides
//! - **Table**: Key to record mapping
//! - **Interceptor**: Owns target, table and façade; lifecycle management
//! - **Facade**: The handle callers operate on instead of the target
//!
//! # Architecture
//!
//! ```text
//! Caller
//!     │
//!     ├─ exists(key) ─┐
//!     ├─ read(key)  ──┼→ Facade → Route ─┬─ Intercepted → Record (has/get/set)
//!     └─ write(key) ──┘                  ├─ Fallthrough → Target
//!                                        └─ Bypassed (disposed) → Target
//! ```

pub mod facade;
pub mod interceptor;
pub mod record;
pub mod table;

// Re-export commonly used types
pub use facade::Facade;
pub use interceptor::{Interceptor, Lifecycle};
pub use record::{
    Delegate, ExistenceChecker, Interception, MethodInterception, PropertyGetter, PropertySetter,
};
pub use table::InterceptionTable;
