//! Handler table and deferral queue.

use super::handler::{Handler, Param};
use crate::config::RuntimeConfig;
use crate::core::{Id, IdTable};
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::debug;

/// Shared handle to a registered handler.
pub type HandlerRef<C> = Rc<dyn Handler<C>>;

/// An event waiting in the deferral queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deferred<E> {
    pub event: E,
    pub param: Param,
}

/// One handler per event, plus a FIFO of deferred events.
///
/// Like the state manager, the dispatcher only stores callbacks. Invoking
/// them is the runtime's job, which clones the [`HandlerRef`] out first so
/// a handler may register, raise or defer while it runs.
pub struct Dispatcher<E: Id, C> {
    handlers: IdTable<E, HandlerRef<C>>,
    deferred: VecDeque<Deferred<E>>,
}

impl<E: Id, C> Default for Dispatcher<E, C> {
    fn default() -> Self {
        Self::with_capacity(RuntimeConfig::default().event_capacity)
    }
}

impl<E: Id, C> Dispatcher<E, C> {
    /// Create a dispatcher with handler slots for `events` events.
    pub fn with_capacity(events: usize) -> Self {
        Self {
            handlers: IdTable::with_capacity(events),
            deferred: VecDeque::new(),
        }
    }

    /// Register the handler for `event`, replacing any previous one.
    ///
    /// Events beyond the table capacity are ignored.
    pub fn on<H>(&mut self, event: E, handler: H)
    where
        H: Handler<C> + 'static,
    {
        if let Err(e) = self.handlers.insert(event, Rc::new(handler)) {
            debug!(event = %event.name(), error = %e, "handler not registered");
        }
    }

    pub fn handler(&self, event: E) -> Option<HandlerRef<C>> {
        self.handlers.get(event).cloned()
    }

    pub fn has_handler(&self, event: E) -> bool {
        self.handlers.contains(event)
    }

    /// Append to the tail of the deferral queue.
    pub fn defer(&mut self, event: E, param: Param) {
        self.deferred.push_back(Deferred { event, param });
    }

    /// Take the oldest deferred event.
    pub fn pop_deferred(&mut self) -> Option<Deferred<E>> {
        self.deferred.pop_front()
    }

    /// Number of events waiting to be recalled.
    pub fn pending(&self) -> usize {
        self.deferred.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Vec<(u8, Param)>;

    #[test]
    fn missing_handler_is_none() {
        let dispatcher: Dispatcher<u8, Log> = Dispatcher::default();
        assert!(dispatcher.handler(3).is_none());
        assert!(!dispatcher.has_handler(3));
    }

    #[test]
    fn second_registration_overwrites_first() {
        let mut dispatcher: Dispatcher<u8, Log> = Dispatcher::with_capacity(4);
        dispatcher.on(1, |log: &mut Log, p: Param| log.push((1, p)));
        dispatcher.on(1, |log: &mut Log, p: Param| log.push((100, p)));

        let mut log = Log::new();
        dispatcher.handler(1).unwrap().invoke(&mut log, 7);

        assert_eq!(log, vec![(100, 7)]);
    }

    #[test]
    fn handler_beyond_capacity_is_dropped() {
        let mut dispatcher: Dispatcher<usize, Log> = Dispatcher::with_capacity(4);
        dispatcher.on(usize::MAX, |log: &mut Log, p: Param| log.push((0, p)));
        dispatcher.on(4, |log: &mut Log, p: Param| log.push((4, p)));

        assert!(!dispatcher.has_handler(usize::MAX));
        assert!(!dispatcher.has_handler(4));
    }

    #[test]
    fn events_beyond_capacity_can_still_be_deferred() {
        let mut dispatcher: Dispatcher<usize, Log> = Dispatcher::with_capacity(1);
        dispatcher.defer(usize::MAX, 3);
        assert_eq!(
            dispatcher.pop_deferred(),
            Some(Deferred {
                event: usize::MAX,
                param: 3
            })
        );
    }

    #[test]
    fn deferred_events_come_back_in_order() {
        let mut dispatcher: Dispatcher<u8, Log> = Dispatcher::default();
        dispatcher.defer(2, 0);
        dispatcher.defer(1, 5);
        dispatcher.defer(2, 9);
        assert_eq!(dispatcher.pending(), 3);

        let drained: Vec<Deferred<u8>> =
            std::iter::from_fn(|| dispatcher.pop_deferred()).collect();

        assert_eq!(
            drained,
            vec![
                Deferred { event: 2, param: 0 },
                Deferred { event: 1, param: 5 },
                Deferred { event: 2, param: 9 },
            ]
        );
        assert_eq!(dispatcher.pending(), 0);
    }
}
