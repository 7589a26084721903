//! Guard predicates over the current state configuration.
//!
//! Handlers are registered per event, not per state, so state-dependent
//! behaviour is expressed by checking guards inside the handler. Guards are
//! pure: they only read the current state of each region.

use super::id::Id;

/// Read-only view of "which state is each region in".
///
/// Implemented by the state manager and by the runtime so guards can be
/// checked from inside any action or handler.
pub trait StateView<R: Id, S: Id> {
    /// True iff `region` has been initialised and is currently in `state`.
    fn is_in(&self, region: R, state: S) -> bool;
}

/// Pure predicate over a [`StateView`].
///
/// # Example
///
/// ```rust
/// use tickstate::core::{Guard, StateView};
///
/// struct Fixed(u8);
///
/// impl StateView<u8, u8> for Fixed {
///     fn is_in(&self, region: u8, state: u8) -> bool {
///         region == 0 && state == self.0
///     }
/// }
///
/// // "started" = running (1) or paused (2)
/// let started = Guard::<u8, u8>::in_state(0, 1).or(Guard::in_state(0, 2));
///
/// assert!(started.check(&Fixed(1)));
/// assert!(started.check(&Fixed(2)));
/// assert!(!started.check(&Fixed(0)));
/// ```
pub struct Guard<R: Id, S: Id> {
    predicate: Box<dyn Fn(&dyn StateView<R, S>) -> bool>,
}

impl<R: Id + 'static, S: Id + 'static> Guard<R, S> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&dyn StateView<R, S>) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that holds while `region` is in `state`.
    pub fn in_state(region: R, state: S) -> Self {
        Self::new(move |view| view.is_in(region, state))
    }

    /// Guard that holds while `region` is in any of `states`.
    pub fn in_any(region: R, states: &[S]) -> Self {
        let states = states.to_vec();
        Self::new(move |view| states.iter().any(|s| view.is_in(region, *s)))
    }

    pub fn or(self, other: Self) -> Self {
        Self::new(move |view| self.check(view) || other.check(view))
    }

    pub fn and(self, other: Self) -> Self {
        Self::new(move |view| self.check(view) && other.check(view))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::new(move |view| !self.check(view))
    }
}

impl<R: Id, S: Id> Guard<R, S> {
    /// Evaluate the guard against the current state configuration.
    pub fn check(&self, view: &dyn StateView<R, S>) -> bool {
        (self.predicate)(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN: u8 = 0;
    const LIGHT: u8 = 1;

    const STOPPED: u8 = 0;
    const RUNNING: u8 = 1;
    const PAUSED: u8 = 2;

    struct View {
        main: Option<u8>,
        light: Option<u8>,
    }

    impl StateView<u8, u8> for View {
        fn is_in(&self, region: u8, state: u8) -> bool {
            match region {
                MAIN => self.main == Some(state),
                LIGHT => self.light == Some(state),
                _ => false,
            }
        }
    }

    #[test]
    fn in_state_matches_only_its_region() {
        let view = View {
            main: Some(RUNNING),
            light: Some(STOPPED),
        };

        assert!(Guard::in_state(MAIN, RUNNING).check(&view));
        assert!(!Guard::in_state(LIGHT, RUNNING).check(&view));
    }

    #[test]
    fn uninitialised_region_satisfies_nothing() {
        let view = View {
            main: None,
            light: None,
        };

        assert!(!Guard::in_any(MAIN, &[STOPPED, RUNNING, PAUSED]).check(&view));
    }

    #[test]
    fn combinators_compose() {
        let view = View {
            main: Some(PAUSED),
            light: Some(RUNNING),
        };

        let started = Guard::in_any(MAIN, &[RUNNING, PAUSED]);
        let lit = Guard::in_state(LIGHT, RUNNING);
        assert!(started.and(lit).check(&view));

        let stopped = Guard::in_state(MAIN, STOPPED);
        assert!(stopped.not().check(&view));
    }

    #[test]
    fn guard_is_deterministic() {
        let view = View {
            main: Some(RUNNING),
            light: None,
        };
        let guard = Guard::in_state(MAIN, RUNNING).or(Guard::in_state(MAIN, PAUSED));

        assert_eq!(guard.check(&view), guard.check(&view));
    }
}
