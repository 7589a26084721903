//! Event dispatcher: one handler per event, immediate raise and deferral.
//!
//! # Key Concepts
//!
//! - **Handlers**: exactly one per event, system-wide; re-registering replaces
//! - **Raise**: synchronous, the handler runs at the call site
//! - **Defer/recall**: FIFO queue drained live, so events deferred while
//!   recalling are delivered in the same pass
//!
//! The dispatch loop itself is on [`Runtime`](crate::Runtime).

mod dispatcher;
mod handler;

pub use dispatcher::{Deferred, Dispatcher, HandlerRef};
pub use handler::{Handler, Param};
