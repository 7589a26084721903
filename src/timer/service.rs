//! Software timers multiplexed over one periodic tick.

use crate::config::RuntimeConfig;
use crate::core::{Id, IdTable};
use tracing::{debug, trace};

/// Default tick length in milliseconds.
pub const TICK_MS: u32 = 50;

/// Per-timer generation counter.
///
/// Bumped (wrapping at 65536) on every start and stop. A captured
/// [`Timeout`] is only honoured while its generation is still current.
pub type Generation = u16;

/// Snapshot of one timer slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    /// Remaining milliseconds; zero means disarmed.
    pub duration: u32,
    /// Reload value after expiry; zero means one-shot.
    pub period: u32,
    pub generation: Generation,
}

impl Timer {
    pub fn is_armed(&self) -> bool {
        self.duration > 0
    }
}

/// Expiry captured during a tick scan, delivered after the scan completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeout<E> {
    pub event: E,
    pub generation: Generation,
}

#[derive(Clone, Copy, Debug)]
struct Slot<E> {
    event: E,
    timer: Timer,
}

/// Table of timers, one per event.
///
/// Timer identity is event identity: starting a timer for an event that
/// already has one re-arms it. Records are created on first use and never
/// removed; `stop` only disarms. Events beyond the table capacity never get a
/// record, so starting them has no effect and no generation is ever valid.
pub struct TimerService<E: Id> {
    slots: IdTable<E, Slot<E>>,
}

impl<E: Id> Default for TimerService<E> {
    fn default() -> Self {
        Self::with_capacity(RuntimeConfig::default().event_capacity)
    }
}

impl<E: Id> TimerService<E> {
    pub fn with_capacity(events: usize) -> Self {
        Self {
            slots: IdTable::with_capacity(events),
        }
    }

    /// Arm (or re-arm) the timer for `event`.
    ///
    /// A periodic timer reloads `duration_ms` after each expiry. Returns the
    /// new generation; the first start of a never-seen timer yields 0, as
    /// does any start of an event the table cannot hold.
    pub fn start(&mut self, event: E, duration_ms: u32, periodic: bool) -> Generation {
        let period = if periodic { duration_ms } else { 0 };
        let generation = self.rearm(event, duration_ms, period);
        trace!(
            event = %event.name(),
            duration_ms,
            periodic,
            generation,
            "timer started"
        );
        generation
    }

    /// Disarm the timer for `event`. Still bumps its generation, so any
    /// expiry already captured for it becomes stale.
    pub fn stop(&mut self, event: E) {
        let generation = self.rearm(event, 0, 0);
        trace!(event = %event.name(), generation, "timer stopped");
    }

    /// True iff a timer exists for `event` and its generation is `generation`.
    pub fn is_valid(&self, event: E, generation: Generation) -> bool {
        self.get(event)
            .is_some_and(|timer| timer.generation == generation)
    }

    pub fn is_armed(&self, event: E) -> bool {
        self.get(event).is_some_and(|timer| timer.is_armed())
    }

    /// Current state of the timer for `event`, if one was ever created.
    pub fn get(&self, event: E) -> Option<Timer> {
        self.slots.get(event).map(|slot| slot.timer)
    }

    /// Milliseconds until `event` next fires, zero when disarmed or unknown.
    pub fn remaining(&self, event: E) -> u32 {
        self.get(event).map_or(0, |timer| timer.duration)
    }

    /// Advance every armed timer by one tick of `tick_ms`.
    ///
    /// Timers reaching exactly zero push a [`Timeout`] onto `expired` (in
    /// ascending event index order) and reload from their period. Nothing is
    /// delivered here; the caller validates and raises afterwards so that
    /// handlers cannot disturb a scan in progress.
    pub fn scan(&mut self, tick_ms: u32, expired: &mut Vec<Timeout<E>>) {
        for (_, slot) in self.slots.iter_mut() {
            let timer = &mut slot.timer;
            if timer.duration == 0 {
                continue;
            }
            timer.duration -= timer.duration.min(tick_ms);
            if timer.duration == 0 {
                expired.push(Timeout {
                    event: slot.event,
                    generation: timer.generation,
                });
                timer.duration = timer.period;
            }
        }
    }

    fn rearm(&mut self, event: E, duration: u32, period: u32) -> Generation {
        let generation = self
            .get(event)
            .map_or(0, |timer| timer.generation.wrapping_add(1));
        let slot = Slot {
            event,
            timer: Timer {
                duration,
                period,
                generation,
            },
        };
        match self.slots.insert(event, slot) {
            Ok(_) => generation,
            Err(e) => {
                debug!(event = %event.name(), error = %e, "timer not armed");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLASH: u8 = 1;
    const INTERVAL: u8 = 2;
    const STOP: u8 = 3;

    fn scan_n(service: &mut TimerService<u8>, ticks: usize) -> Vec<Timeout<u8>> {
        let mut expired = Vec::new();
        for _ in 0..ticks {
            service.scan(TICK_MS, &mut expired);
        }
        expired
    }

    #[test]
    fn first_start_yields_generation_zero() {
        let mut service = TimerService::default();
        assert_eq!(service.start(FLASH, 500, true), 0);
        assert_eq!(service.start(FLASH, 500, true), 1);
    }

    #[test]
    fn stop_bumps_generation_and_disarms() {
        let mut service = TimerService::default();
        let generation = service.start(FLASH, 500, true);
        service.stop(FLASH);

        assert!(!service.is_valid(FLASH, generation));
        assert!(service.is_valid(FLASH, generation + 1));
        assert!(!service.is_armed(FLASH));
        assert_eq!(service.get(FLASH).map(|t| t.period), Some(0));
    }

    #[test]
    fn stop_on_unknown_timer_creates_disarmed_record() {
        let mut service = TimerService::default();
        service.stop(STOP);

        assert_eq!(
            service.get(STOP),
            Some(Timer {
                duration: 0,
                period: 0,
                generation: 0
            })
        );
    }

    #[test]
    fn unknown_timer_is_never_valid() {
        let service: TimerService<u8> = TimerService::default();
        assert!(!service.is_valid(INTERVAL, 0));
    }

    #[test]
    fn generation_wraps_at_u16() {
        let mut service = TimerService::default();
        for _ in 0..=u16::MAX {
            service.start(FLASH, 100, false);
        }
        assert_eq!(service.get(FLASH).map(|t| t.generation), Some(u16::MAX));
        assert_eq!(service.start(FLASH, 100, false), 0);
    }

    #[test]
    fn one_shot_fires_once_then_disarms() {
        let mut service = TimerService::default();
        let generation = service.start(STOP, 100, false);

        let expired = scan_n(&mut service, 2);
        assert_eq!(
            expired,
            vec![Timeout {
                event: STOP,
                generation
            }]
        );
        assert!(!service.is_armed(STOP));
        assert!(scan_n(&mut service, 10).is_empty());
    }

    #[test]
    fn periodic_reloads_from_period() {
        let mut service = TimerService::default();
        service.start(FLASH, 100, true);

        assert_eq!(scan_n(&mut service, 10).len(), 5);
        assert_eq!(service.remaining(FLASH), 100);
    }

    #[test]
    fn partial_tick_rounds_up_to_next_tick() {
        let mut service = TimerService::default();
        service.start(FLASH, 120, false);

        assert!(scan_n(&mut service, 2).is_empty());
        assert_eq!(scan_n(&mut service, 1).len(), 1);
    }

    #[test]
    fn same_tick_expiries_are_in_event_order() {
        let mut service = TimerService::default();
        service.start(STOP, 50, false);
        service.start(FLASH, 50, false);
        service.start(INTERVAL, 50, false);

        let events: Vec<u8> = scan_n(&mut service, 1).iter().map(|t| t.event).collect();
        assert_eq!(events, vec![FLASH, INTERVAL, STOP]);
    }

    #[test]
    fn events_beyond_capacity_have_no_timer() {
        let mut service: TimerService<usize> = TimerService::with_capacity(4);
        assert_eq!(service.start(usize::MAX, 100, false), 0);
        service.stop(usize::MAX);
        assert_eq!(service.start(4, 100, true), 0);

        assert!(service.get(usize::MAX).is_none());
        assert!(!service.is_valid(usize::MAX, 0));
        assert!(!service.is_armed(4));

        let mut expired = Vec::new();
        service.scan(TICK_MS, &mut expired);
        service.scan(TICK_MS, &mut expired);
        assert!(expired.is_empty());
    }

    #[test]
    fn zero_duration_start_is_disarmed() {
        let mut service = TimerService::default();
        service.start(FLASH, 0, true);
        assert!(!service.is_armed(FLASH));
        assert!(scan_n(&mut service, 4).is_empty());
    }
}
