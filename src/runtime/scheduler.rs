//! Drift-correcting tick loop.

use super::machine::Runtime;
use crate::core::Id;
use crate::timer::Clock;
use tracing::trace;

/// Drives [`Runtime::tick`] at the runtime's tick rate.
///
/// The scheduler keeps an absolute wake-up time and advances it by one tick
/// per iteration, sleeping only for whatever is left of the tick after the
/// handlers ran. Processing time therefore does not accumulate as drift.
/// Each sleep is at least one millisecond, so the loop always yields even
/// when it is running behind.
///
/// # Example
///
/// ```rust
/// use tickstate::timer::ManualClock;
/// use tickstate::{Runtime, Scheduler};
///
/// const FLASH: u8 = 0;
///
/// let mut rt: Runtime<u8, u8, u8, u32> = Runtime::new(0);
/// rt.on(FLASH, |rt, _| *rt.app_mut() += 1);
/// rt.start(FLASH, 500, true);
///
/// let mut scheduler = Scheduler::new(ManualClock::new());
/// scheduler.run_for(&mut rt, 20);
///
/// assert_eq!(*rt.app(), 2);
/// assert_eq!(scheduler.clock().peek(), 1000);
/// ```
pub struct Scheduler<C: Clock> {
    clock: C,
    wake_time_ms: u64,
}

impl<C: Clock> Scheduler<C> {
    /// Create a scheduler whose first tick is due now.
    pub fn new(clock: C) -> Self {
        let wake_time_ms = clock.now_ms();
        Self {
            clock,
            wake_time_ms,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn into_clock(self) -> C {
        self.clock
    }

    /// Absolute time at which the next tick is due.
    pub fn wake_time_ms(&self) -> u64 {
        self.wake_time_ms
    }

    /// Run one tick, then sleep until the next tick boundary.
    pub fn step<R, S, E, A>(&mut self, rt: &mut Runtime<R, S, E, A>)
    where
        R: Id,
        S: Id,
        E: Id,
    {
        rt.tick();
        self.wake_time_ms += u64::from(rt.tick_ms());
        let now = self.clock.now_ms();
        let delay = self.wake_time_ms.saturating_sub(now).max(1);
        trace!(tick = rt.ticks(), now, delay, "sleeping until next tick");
        self.clock.sleep_ms(delay);
    }

    /// Run exactly `ticks` ticks.
    pub fn run_for<R, S, E, A>(&mut self, rt: &mut Runtime<R, S, E, A>, ticks: u64)
    where
        R: Id,
        S: Id,
        E: Id,
    {
        for _ in 0..ticks {
            self.step(rt);
        }
    }

    /// Keep ticking while `keep_going` holds, checking it before each tick.
    pub fn run_while<R, S, E, A, F>(&mut self, rt: &mut Runtime<R, S, E, A>, mut keep_going: F)
    where
        R: Id,
        S: Id,
        E: Id,
        F: FnMut(&Runtime<R, S, E, A>) -> bool,
    {
        while keep_going(rt) {
            self.step(rt);
        }
    }
}
