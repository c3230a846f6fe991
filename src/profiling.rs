//! Profiling support via Tracy.
//!
//! This module provides optional CPU profiling instrumentation for the
//! compile pipeline using the [Tracy profiler](https://github.com/wolfpld/tracy).
//! Profiling is enabled via the `profiling` Cargo feature:
//!
//! ```toml
//! [dependencies]
//! firethorn = { version = "0.1", features = ["profiling"] }
//! ```
//!
//! Use the provided macros to instrument code:
//!
//! ```ignore
//! use firethorn::profiling::{profile_function, profile_scope};
//!
//! fn compile_stage() {
//!     profile_function!();
//!
//!     {
//!         profile_scope!("inner_work");
//!         // ... do work ...
//!     }
//! }
//! ```
//!
//! When profiling is disabled (the default), all macros compile to no-ops
//! with zero runtime overhead.

// Re-export tracy-client types when profiling is enabled
#[cfg(feature = "profiling")]
pub use tracy_client::{self, Client, span};

/// Create a profiling span for the current scope.
///
/// The span automatically ends when the scope exits.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_span = $crate::profiling::span!($name);
    };
}

/// Create a profiling span (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_scope {
    ($name:expr) => {};
}

/// Create a profiling span for the entire function.
///
/// Place this at the start of a function to profile its entire execution.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_function {
    () => {
        let _profile_span = $crate::profiling::span!();
    };
}

/// Create a profiling span for function (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_function {
    () => {};
}

// Re-export macros at module level
pub use profile_function;
pub use profile_scope;
