//! Builder API for ergonomic runtime construction.
//!
//! This module provides a fluent builder and an identifier macro for
//! declaring state machines with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::RuntimeBuilder;
