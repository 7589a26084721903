//! Action table and current-state vector.

use super::action::Action;
use crate::core::{CapacityError, Id, IdTable, StateView};
use std::rc::Rc;
use tracing::debug;

/// Shared handle to a registered action.
pub type ActionRef<C> = Rc<dyn Action<C>>;

struct Actions<C> {
    entry: Option<ActionRef<C>>,
    exit: Option<ActionRef<C>>,
}

impl<C> Default for Actions<C> {
    fn default() -> Self {
        Self {
            entry: None,
            exit: None,
        }
    }
}

/// Tracks the current state of every region and the actions bound to each
/// (region, state) pair.
///
/// The manager never invokes actions itself. It hands out cloned
/// [`ActionRef`]s so the owner can invoke them with mutable access to the
/// full context, which is what lets an action re-enter the runtime.
///
/// Both tables have a fixed capacity. Registering an action for a region or
/// state beyond it is ignored, and setting the current state of a region
/// beyond it fails with [`CapacityError`].
pub struct StateManager<R: Id, S: Id, C> {
    actions: IdTable<R, IdTable<S, Actions<C>>>,
    current: IdTable<R, S>,
    states_per_region: usize,
}

impl<R: Id, S: Id, C> StateManager<R, S, C> {
    /// Create a manager for `regions` regions of up to `states` states each.
    pub fn with_capacity(regions: usize, states: usize) -> Self {
        Self {
            actions: IdTable::with_capacity(regions),
            current: IdTable::with_capacity(regions),
            states_per_region: states,
        }
    }

    /// Bind the entry action of (`region`, `state`), replacing any previous one.
    pub fn on_entry<A>(&mut self, region: R, state: S, action: A)
    where
        A: Action<C> + 'static,
    {
        if let Some(slot) = self.slot(region, state) {
            slot.entry = Some(Rc::new(action));
        }
    }

    /// Bind the exit action of (`region`, `state`), replacing any previous one.
    pub fn on_exit<A>(&mut self, region: R, state: S, action: A)
    where
        A: Action<C> + 'static,
    {
        if let Some(slot) = self.slot(region, state) {
            slot.exit = Some(Rc::new(action));
        }
    }

    pub fn entry_action(&self, region: R, state: S) -> Option<ActionRef<C>> {
        self.lookup(region, state)
            .and_then(|actions| actions.entry.clone())
    }

    pub fn exit_action(&self, region: R, state: S) -> Option<ActionRef<C>> {
        self.lookup(region, state)
            .and_then(|actions| actions.exit.clone())
    }

    /// Current state of `region`, or `None` before its first `initial`.
    pub fn current(&self, region: R) -> Option<S> {
        self.current.get(region).copied()
    }

    /// Overwrite the current state of `region`, returning the previous one.
    pub fn set_current(&mut self, region: R, state: S) -> Result<Option<S>, CapacityError> {
        self.current.insert(region, state)
    }

    fn lookup(&self, region: R, state: S) -> Option<&Actions<C>> {
        self.actions.get(region).and_then(|states| states.get(state))
    }

    fn slot(&mut self, region: R, state: S) -> Option<&mut Actions<C>> {
        let states = self.states_per_region;
        let slot = self
            .actions
            .get_or_insert_with(region, || IdTable::with_capacity(states))
            .and_then(|table| table.get_or_insert_with(state, Actions::default));
        match slot {
            Ok(actions) => Some(actions),
            Err(e) => {
                debug!(
                    region = %region.name(),
                    state = %state.name(),
                    error = %e,
                    "action not registered"
                );
                None
            }
        }
    }
}

impl<R: Id, S: Id, C> StateView<R, S> for StateManager<R, S, C> {
    fn is_in(&self, region: R, state: S) -> bool {
        self.current(region) == Some(state)
    }
}
