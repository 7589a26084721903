//! Bounded record of state changes.
//!
//! Recording is opt-in: a history with a limit of zero keeps nothing, so the
//! runtime stays within its fixed tables unless a caller asks for a trace.

use super::id::Id;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Record of a single state change in one region.
///
/// `from` is `None` for the first `initial` of a region. `tick` is the
/// number of timer ticks the runtime had processed when the change happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition<R, S> {
    pub region: R,
    pub from: Option<S>,
    pub to: S,
    pub tick: u64,
}

/// Most recent state changes, oldest first.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{StateHistory, StateTransition};
///
/// let mut history = StateHistory::with_limit(2);
/// for (from, to) in [(None, 0u8), (Some(0), 1), (Some(1), 0)] {
///     history.record(StateTransition { region: 0u8, from, to, tick: 0 });
/// }
///
/// // Only the two most recent changes are kept.
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.path(0), vec![0, 1, 0]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<R, S> {
    limit: usize,
    transitions: VecDeque<StateTransition<R, S>>,
}

impl<R: Id, S: Id> Default for StateHistory<R, S> {
    fn default() -> Self {
        Self::with_limit(0)
    }
}

impl<R: Id, S: Id> StateHistory<R, S> {
    /// Create a history keeping at most `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            transitions: VecDeque::with_capacity(limit),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<R, S>) {
        if self.limit == 0 {
            return;
        }
        if self.transitions.len() == self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Recorded transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<R, S>> {
        self.transitions.iter()
    }

    /// States traversed by `region`, as far back as the history reaches.
    ///
    /// Starts with the `from` state of the oldest retained record for the
    /// region (when it has one), followed by each `to`.
    pub fn path(&self, region: R) -> Vec<S> {
        let mut records = self.transitions.iter().filter(|t| t.region == region);
        let mut path = Vec::new();
        if let Some(first) = records.next() {
            path.extend(first.from);
            path.push(first.to);
        }
        path.extend(records.map(|t| t.to));
        path
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
