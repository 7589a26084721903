//! The runtime context and the loop that drives it.
//!
//! [`Runtime`] ties the three components together and implements the
//! run-to-completion semantics of transitions, dispatch and tick delivery.
//! [`Scheduler`] feeds it ticks from a [`Clock`](crate::timer::Clock).

mod machine;
mod scheduler;

pub use machine::Runtime;
pub use scheduler::Scheduler;
