//! State manager: orthogonal regions with entry and exit actions.
//!
//! Each region tracks exactly one current state once initialised. Every
//! (region, state) pair may own one entry and one exit action; absent
//! actions simply mean "nothing to do". The run-to-completion semantics of
//! `initial` and `transit` live on [`Runtime`](crate::Runtime), which owns
//! the manager and can hand actions a mutable context.

mod action;
mod manager;

pub use action::Action;
pub use manager::{ActionRef, StateManager};
