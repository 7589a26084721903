//! Core identifier and bookkeeping types.
//!
//! This module holds the pure building blocks shared by the components:
//! - Identifiers via the `Id` trait
//! - Fixed-capacity identifier-keyed tables
//! - Guard predicates over the current state configuration
//! - Bounded transition history
//!
//! Nothing in here invokes application callbacks.

mod guard;
mod history;
mod id;
mod table;

pub use guard::{Guard, StateView};
pub use history::{StateHistory, StateTransition};
pub use id::Id;
pub use table::{CapacityError, IdTable};
