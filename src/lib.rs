//! Tickstate: a run-to-completion state machine runtime
//!
//! Tickstate is a small runtime for event-driven control logic of the kind
//! found on microcontrollers: a handful of states, a few buttons, some LEDs
//! and a periodic hardware tick. Everything runs on one logical thread and
//! every callback runs to completion before the next event is processed.
//!
//! # Core Concepts
//!
//! - **Regions and states**: orthogonal regions each track one current state,
//!   with optional entry and exit actions per state
//! - **Events**: one handler per event, raised immediately or deferred into a
//!   FIFO that is drained by `recall`
//! - **Timers**: logical timers keyed by the event they raise, multiplexed on
//!   one tick, with a generation counter that discards stale expiries
//! - **Runtime**: the context object owning all tables; actions and handlers
//!   get `&mut Runtime` and may re-enter it
//!
//! # Example
//!
//! ```rust
//! use tickstate::timer::ManualClock;
//! use tickstate::{id_enum, Runtime, Scheduler};
//!
//! id_enum! {
//!     enum Region { Main }
//! }
//! id_enum! {
//!     enum State { Stopped, Running }
//! }
//! id_enum! {
//!     enum Evt { Start, TimerInterval }
//! }
//!
//! let mut rt: Runtime<Region, State, Evt, u32> = Runtime::new(0);
//!
//! rt.on_entry(Region::Main, State::Running, |rt| {
//!     rt.start(Evt::TimerInterval, 100, true);
//! });
//! rt.on_exit(Region::Main, State::Running, |rt| rt.stop(Evt::TimerInterval));
//!
//! rt.on(Evt::Start, |rt, _| {
//!     if rt.is_in(Region::Main, State::Stopped) {
//!         rt.transit(Region::Main, State::Running);
//!     }
//! });
//! rt.on(Evt::TimerInterval, |rt, _| {
//!     *rt.app_mut() += 1;
//!     if *rt.app() == 3 {
//!         rt.transit(Region::Main, State::Stopped);
//!     }
//! });
//!
//! rt.initial(Region::Main, State::Stopped);
//! rt.raise(Evt::Start);
//!
//! let mut scheduler = Scheduler::new(ManualClock::new());
//! scheduler.run_for(&mut rt, 20);
//!
//! assert_eq!(*rt.app(), 3);
//! assert!(rt.is_in(Region::Main, State::Stopped));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod event;
pub mod runtime;
pub mod state;
pub mod timer;

// Re-export commonly used types
pub use builder::{BuildError, RuntimeBuilder};
pub use config::{ConfigError, RuntimeConfig};
pub use crate::core::{Guard, Id, StateHistory, StateTransition, StateView};
pub use event::Param;
pub use runtime::{Runtime, Scheduler};
pub use timer::{Clock, Generation, ManualClock, SystemClock, TICK_MS};
