//! Runtime context owning every table of one state machine.

use crate::config::{ConfigError, RuntimeConfig};
use crate::core::{Guard, Id, StateHistory, StateTransition, StateView};
use crate::event::{Dispatcher, Handler, Param};
use crate::state::{Action, StateManager};
use crate::timer::{Generation, Timeout, TimerService};
use tracing::{debug, trace};

/// One run-to-completion state machine.
///
/// Owns the state manager, the event dispatcher, the timer service and the
/// application's extended state `A`. Entry/exit actions and event handlers
/// receive `&mut Runtime`, so they can query and drive the machine
/// re-entrantly; every nested call runs to completion before returning.
///
/// `R`, `S` and `E` are the region, state and event identifier types.
///
/// # Recursion
///
/// `raise` and `transit` may be called from inside handlers and actions
/// with no cycle detection. A handler cycle (A raises B raises A ...) or an
/// entry action that unconditionally re-enters its own state recurses until
/// the stack overflows. Bounding the recursion is the application's job.
///
/// # Example
///
/// ```rust
/// use tickstate::Runtime;
///
/// const MAIN: u8 = 0;
/// const STOPPED: u8 = 0;
/// const RUNNING: u8 = 1;
/// const START: u8 = 0;
///
/// let mut rt: Runtime<u8, u8, u8, Vec<&str>> = Runtime::new(Vec::new());
/// rt.on_entry(MAIN, RUNNING, |rt| rt.app_mut().push("running"));
/// rt.on(START, |rt, _| {
///     if rt.is_in(MAIN, STOPPED) {
///         rt.transit(MAIN, RUNNING);
///     }
/// });
///
/// rt.initial(MAIN, STOPPED);
/// rt.raise(START);
///
/// assert!(rt.is_in(MAIN, RUNNING));
/// assert_eq!(rt.app(), &vec!["running"]);
/// ```
pub struct Runtime<R: Id, S: Id, E: Id, A = ()> {
    states: StateManager<R, S, Runtime<R, S, E, A>>,
    events: Dispatcher<E, Runtime<R, S, E, A>>,
    timers: TimerService<E>,
    history: StateHistory<R, S>,
    expired: Vec<Timeout<E>>,
    config: RuntimeConfig,
    ticks: u64,
    app: A,
}

impl<R: Id, S: Id, E: Id, A> Runtime<R, S, E, A> {
    /// Create a runtime with the default configuration.
    pub fn new(app: A) -> Self {
        Self::from_parts(RuntimeConfig::default(), app)
    }

    /// Create a runtime with `config`, rejecting it if it is invalid.
    ///
    /// Identifiers whose index falls outside the configured capacities are
    /// ignored: registrations and timers for them are dropped, and a region
    /// beyond `region_capacity` never becomes current.
    pub fn with_config(config: RuntimeConfig, app: A) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, app))
    }

    fn from_parts(config: RuntimeConfig, app: A) -> Self {
        Self {
            states: StateManager::with_capacity(config.region_capacity, config.state_capacity),
            events: Dispatcher::with_capacity(config.event_capacity),
            timers: TimerService::with_capacity(config.event_capacity),
            history: StateHistory::with_limit(config.history_limit),
            expired: Vec::new(),
            ticks: 0,
            config,
            app,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn tick_ms(&self) -> u32 {
        self.config.tick_ms
    }

    /// Number of ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn into_app(self) -> A {
        self.app
    }

    pub fn history(&self) -> &StateHistory<R, S> {
        &self.history
    }

    pub fn timers(&self) -> &TimerService<E> {
        &self.timers
    }

    // State manager

    /// Bind the entry action of (`region`, `state`), replacing any previous one.
    pub fn on_entry<F>(&mut self, region: R, state: S, action: F)
    where
        F: Fn(&mut Self) + 'static,
    {
        self.states.on_entry(region, state, action);
    }

    /// Bind the exit action of (`region`, `state`), replacing any previous one.
    pub fn on_exit<F>(&mut self, region: R, state: S, action: F)
    where
        F: Fn(&mut Self) + 'static,
    {
        self.states.on_exit(region, state, action);
    }

    /// True iff `region` is currently in `state`. False for a region that
    /// was never initialised.
    pub fn is_in(&self, region: R, state: S) -> bool {
        self.states.is_in(region, state)
    }

    pub fn current(&self, region: R) -> Option<S> {
        self.states.current(region)
    }

    /// Evaluate `guard` against the current state configuration.
    pub fn check(&self, guard: &Guard<R, S>) -> bool {
        guard.check(self)
    }

    /// Set the current state of `region` without running any exit action,
    /// then run the entry action of `state`.
    pub fn initial(&mut self, region: R, state: S) {
        debug!(region = %region.name(), state = %state.name(), "initial state");
        self.enter(region, state);
    }

    /// Exit the current state of `region` (if any), then enter `state`.
    ///
    /// Transiting to the state the region is already in is a full
    /// self-transition: exit then entry both run. Actions may transit again;
    /// the nested transition completes before this one continues.
    pub fn transit(&mut self, region: R, state: S) {
        if let Some(current) = self.states.current(region) {
            debug!(
                region = %region.name(),
                from = %current.name(),
                to = %state.name(),
                "transit"
            );
            if let Some(exit) = self.states.exit_action(region, current) {
                exit.invoke(self);
            }
        }
        self.enter(region, state);
    }

    fn enter(&mut self, region: R, state: S) {
        let from = match self.states.set_current(region, state) {
            Ok(from) => from,
            Err(e) => {
                debug!(
                    region = %region.name(),
                    state = %state.name(),
                    error = %e,
                    "state not entered"
                );
                return;
            }
        };
        self.history.record(StateTransition {
            region,
            from,
            to: state,
            tick: self.ticks,
        });
        if let Some(entry) = self.states.entry_action(region, state) {
            entry.invoke(self);
        }
    }

    // Event dispatcher

    /// Register the handler for `event`, replacing any previous one.
    pub fn on<F>(&mut self, event: E, handler: F)
    where
        F: Fn(&mut Self, Param) + 'static,
    {
        self.events.on(event, handler);
    }

    /// Dispatch `event` with parameter 0.
    pub fn raise(&mut self, event: E) {
        self.raise_with(event, 0);
    }

    /// Dispatch `event` immediately. Silently dropped when no handler is
    /// registered.
    pub fn raise_with(&mut self, event: E, param: Param) {
        match self.events.handler(event) {
            Some(handler) => {
                trace!(event = %event.name(), param, "raise");
                handler.invoke(self, param);
            }
            None => debug!(event = %event.name(), param, "no handler, event dropped"),
        }
    }

    /// Queue `event` with parameter 0 for the next [`recall`](Self::recall).
    pub fn defer(&mut self, event: E) {
        self.defer_with(event, 0);
    }

    /// Queue `event` for the next [`recall`](Self::recall). Never dispatches.
    pub fn defer_with(&mut self, event: E, param: Param) {
        trace!(event = %event.name(), param, "defer");
        self.events.defer(event, param);
    }

    /// Raise every deferred event, oldest first, until the queue is empty.
    ///
    /// Events deferred by handlers during the recall join the tail and are
    /// delivered in the same pass.
    pub fn recall(&mut self) {
        while let Some(deferred) = self.events.pop_deferred() {
            self.raise_with(deferred.event, deferred.param);
        }
    }

    /// Number of events waiting in the deferral queue.
    pub fn pending(&self) -> usize {
        self.events.pending()
    }

    // Timer service

    /// Arm the timer for `event`. See [`TimerService::start`].
    pub fn start(&mut self, event: E, duration_ms: u32, periodic: bool) -> Generation {
        self.timers.start(event, duration_ms, periodic)
    }

    /// Disarm the timer for `event`. See [`TimerService::stop`].
    pub fn stop(&mut self, event: E) {
        self.timers.stop(event);
    }

    pub fn is_valid(&self, event: E, generation: Generation) -> bool {
        self.timers.is_valid(event, generation)
    }

    /// Process one tick.
    ///
    /// Scans all timers first, then raises each captured expiry whose
    /// generation is still current. Expiries invalidated by an earlier
    /// handler in the same batch are dropped.
    pub fn tick(&mut self) {
        self.ticks += 1;
        let mut expired = std::mem::take(&mut self.expired);
        self.timers.scan(self.config.tick_ms, &mut expired);
        for timeout in expired.drain(..) {
            if self.timers.is_valid(timeout.event, timeout.generation) {
                self.raise(timeout.event);
            } else {
                debug!(
                    event = %timeout.event.name(),
                    generation = timeout.generation,
                    "stale timeout dropped"
                );
            }
        }
        self.expired = expired;
    }
}

impl<R: Id, S: Id, E: Id, A> StateView<R, S> for Runtime<R, S, E, A> {
    fn is_in(&self, region: R, state: S) -> bool {
        self.states.is_in(region, state)
    }
}
