//! Timer service: many logical timers on one fixed-rate tick.
//!
//! Timers are identified by the event they raise. Each tick is processed in
//! two phases: a scan that decrements every armed timer and captures
//! `(event, generation)` for those that reached zero, then a delivery pass
//! (on [`Runtime::tick`](crate::Runtime::tick)) that raises only the
//! captures whose generation is still current. Stopping or restarting a
//! timer from an earlier callback in the same batch therefore discards its
//! stale expiry.

mod clock;
mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use service::{Generation, Timeout, Timer, TimerService, TICK_MS};
