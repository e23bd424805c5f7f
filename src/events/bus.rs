//! Per-engine publish/subscribe.
//!
//! Each `GameEngine` owns one `EventBus`. Listeners are plain closures keyed
//! by [`EventKind`]; they run synchronously, in subscription order, while
//! the engine is still inside the call that produced the event.

use rustc_hash::FxHashMap;

use super::event::{EventKind, GameEvent};

/// Handle returned by `on`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Event subscription registry.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use konivrer_engine::core::PlayerId;
/// use konivrer_engine::events::{EventBus, EventKind, GameEvent};
///
/// let seen = Rc::new(Cell::new(0));
/// let mut bus = EventBus::new();
/// let counter = Rc::clone(&seen);
/// let id = bus.on(EventKind::TurnStarted, move |_| counter.set(counter.get() + 1));
///
/// bus.emit(&GameEvent::TurnStarted { turn: 1, player: PlayerId::new(0) });
/// assert!(bus.off(EventKind::TurnStarted, id));
/// bus.emit(&GameEvent::TurnStarted { turn: 2, player: PlayerId::new(0) });
///
/// assert_eq!(seen.get(), 1);
/// ```
#[derive(Default)]
pub struct EventBus {
    listeners: FxHashMap<EventKind, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one kind of event.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Unsubscribe. Returns false if the listener was not registered for `kind`.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(listener_id, _)| *listener_id != id);
        list.len() != before
    }

    /// Deliver an event to every listener of its kind.
    pub fn emit(&mut self, event: &GameEvent) {
        if let Some(list) = self.listeners.get_mut(&event.kind()) {
            for (_, listener) in list.iter_mut() {
                listener(event);
            }
        }
    }

    /// Number of listeners for a kind.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total: usize = self.listeners.values().map(Vec::len).sum();
        f.debug_struct("EventBus").field("listeners", &total).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityId, PlayerId};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_only_matching_kind_delivered() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let sink = Rc::clone(&log);
        bus.on(EventKind::ResourcePlayed, move |e| sink.borrow_mut().push(e.kind()));

        bus.emit(&GameEvent::TurnStarted { turn: 1, player: PlayerId::new(0) });
        bus.emit(&GameEvent::ResourcePlayed { player: PlayerId::new(0), card: EntityId(5) });

        assert_eq!(*log.borrow(), vec![EventKind::ResourcePlayed]);
    }

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        for tag in ["first", "second"] {
            let sink = Rc::clone(&order);
            bus.on(EventKind::TurnStarted, move |_| sink.borrow_mut().push(tag));
        }

        bus.emit(&GameEvent::TurnStarted { turn: 1, player: PlayerId::new(1) });

        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_off_unknown_listener() {
        let mut bus = EventBus::new();
        let id = bus.on(EventKind::Log, |_| {});
        assert!(!bus.off(EventKind::GameOver, id));
        assert_eq!(bus.listener_count(EventKind::Log), 1);
        assert!(bus.off(EventKind::Log, id));
        assert!(!bus.off(EventKind::Log, id));
    }
}
