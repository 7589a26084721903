//! Time sources for the tick loop.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic millisecond clock with a sleep primitive.
///
/// The scheduler's only suspension point is [`Clock::sleep_ms`]; injecting
/// the clock lets tests replace real time with a simulated one.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;

    /// Block the calling thread for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u64);
}

/// Wall-clock time from [`Instant`], sleeping with [`std::thread::sleep`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn sleep_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Simulated clock for deterministic runs.
///
/// Sleeping advances time instantly by the requested amount. Every reading
/// of the clock may additionally cost `overhead_ms`, which models the work
/// done between two reads and lets tests observe drift correction.
///
/// The clock always keeps the number of sleeps and the most recent one.
/// The full sequence is only kept after [`recording`](Self::recording), so
/// a long simulation stays in constant memory.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
    overhead_ms: u64,
    sleep_count: u64,
    last_sleep: Option<u64>,
    recorded: Option<Vec<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock whose every `now_ms` call advances time by `overhead_ms` first.
    pub fn with_overhead(overhead_ms: u64) -> Self {
        Self {
            overhead_ms,
            ..Self::default()
        }
    }

    /// Keep every sleep from now on, readable through [`sleeps`](Self::sleeps).
    pub fn recording(mut self) -> Self {
        self.recorded = Some(Vec::new());
        self
    }

    /// Move time forward without sleeping.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Recorded sleeps in order. Empty unless the clock is recording.
    pub fn sleeps(&self) -> &[u64] {
        self.recorded.as_deref().unwrap_or_default()
    }

    pub fn sleep_count(&self) -> u64 {
        self.sleep_count
    }

    pub fn last_sleep(&self) -> Option<u64> {
        self.last_sleep
    }

    /// Current time without charging the read overhead.
    pub fn peek(&self) -> u64 {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.advance(self.overhead_ms);
        self.now.get()
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.sleep_count += 1;
        self.last_sleep = Some(ms);
        if let Some(recorded) = self.recorded.as_mut() {
            recorded.push(ms);
        }
        self.advance(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_on_sleep() {
        let mut clock = ManualClock::new().recording();
        clock.sleep_ms(50);
        clock.sleep_ms(25);

        assert_eq!(clock.now_ms(), 75);
        assert_eq!(clock.sleeps(), &[50, 25]);
    }

    #[test]
    fn manual_clock_keeps_no_history_unless_recording() {
        let mut clock = ManualClock::new();
        for _ in 0..10_000 {
            clock.sleep_ms(50);
        }

        assert!(clock.sleeps().is_empty());
        assert_eq!(clock.sleep_count(), 10_000);
        assert_eq!(clock.last_sleep(), Some(50));
        assert_eq!(clock.peek(), 500_000);
    }

    #[test]
    fn manual_clock_charges_overhead_per_read() {
        let clock = ManualClock::with_overhead(3);
        assert_eq!(clock.now_ms(), 3);
        assert_eq!(clock.now_ms(), 6);
        assert_eq!(clock.peek(), 6);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let before = clock.now_ms();
        clock.sleep_ms(2);
        assert!(clock.now_ms() >= before + 2);
    }
}
