//! Event system for host-emitted events

pub mod game;

pub use game::{
    BlockBreakEvent, Hand, InteractAction, PlayerInteractEvent, PlayerItemConsumeEvent,
};

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Trait marker for types that can be used as events
pub trait Event: Send + Sync + 'static {}

/// Events a handler can cancel to stop the host's default action
pub trait Cancellable: Event {
    fn is_cancelled(&self) -> bool;
    fn set_cancelled(&mut self, cancelled: bool);
}

/// Event priority for ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventPriority {
    Lowest = 0,
    Low = 1,
    #[default]
    Normal = 2,
    High = 3,
    Highest = 4,
}

type HandlerFn<T> = Box<dyn Fn(&mut T) + Send + Sync>;

struct Subscription {
    priority: EventPriority,
    /// Always a `HandlerFn<T>` for the `T` the subscription is keyed by
    handler: Box<dyn Any + Send + Sync>,
}

/// Event bus delivering events to subscribed handlers.
///
/// Handlers run synchronously in priority order, highest first; handlers
/// of equal priority run in subscription order.
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<TypeId, Vec<Subscription>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events of a specific type with default priority
    pub fn subscribe<T, F>(&mut self, handler: F)
    where
        T: Event,
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.subscribe_with_priority(EventPriority::default(), handler);
    }

    /// Subscribe to events of a specific type
    pub fn subscribe_with_priority<T, F>(&mut self, priority: EventPriority, handler: F)
    where
        T: Event,
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        let handler: HandlerFn<T> = Box::new(handler);
        let subscriptions = self.subscribers.entry(TypeId::of::<T>()).or_default();

        let insert_pos = subscriptions
            .iter()
            .position(|existing| existing.priority < priority)
            .unwrap_or(subscriptions.len());

        subscriptions.insert(
            insert_pos,
            Subscription {
                priority,
                handler: Box::new(handler),
            },
        );
    }

    /// Deliver an event to every handler subscribed to its type
    pub fn dispatch<T: Event>(&self, event: &mut T) {
        let Some(subscriptions) = self.subscribers.get(&TypeId::of::<T>()) else {
            return;
        };

        for subscription in subscriptions {
            if let Some(handler) = subscription.handler.downcast_ref::<HandlerFn<T>>() {
                handler(event);
            }
        }
    }

    /// Get the number of handlers subscribed to an event type
    pub fn subscriber_count<T: Event>(&self) -> usize {
        self.subscribers
            .get(&TypeId::of::<T>())
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Ping {
        seen: Vec<&'static str>,
        cancelled: bool,
    }

    impl Event for Ping {}

    impl Cancellable for Ping {
        fn is_cancelled(&self) -> bool {
            self.cancelled
        }

        fn set_cancelled(&mut self, cancelled: bool) {
            self.cancelled = cancelled;
        }
    }

    struct Pong;
    impl Event for Pong {}

    #[test]
    fn test_priority_order() {
        let mut bus = EventBus::new();
        bus.subscribe_with_priority(EventPriority::Low, |e: &mut Ping| e.seen.push("low"));
        bus.subscribe(|e: &mut Ping| e.seen.push("normal-1"));
        bus.subscribe_with_priority(EventPriority::Highest, |e: &mut Ping| e.seen.push("highest"));
        bus.subscribe(|e: &mut Ping| e.seen.push("normal-2"));

        let mut ping = Ping::default();
        bus.dispatch(&mut ping);
        assert_eq!(ping.seen, vec!["highest", "normal-1", "normal-2", "low"]);
    }

    #[test]
    fn test_dispatch_by_type() {
        let pongs = Arc::new(Mutex::new(0));
        let mut bus = EventBus::new();
        let counter = pongs.clone();
        bus.subscribe(move |_: &mut Pong| *counter.lock() += 1);

        bus.dispatch(&mut Ping::default());
        bus.dispatch(&mut Pong);
        bus.dispatch(&mut Pong);

        assert_eq!(*pongs.lock(), 2);
        assert_eq!(bus.subscriber_count::<Pong>(), 1);
        assert_eq!(bus.subscriber_count::<Ping>(), 0);
    }

    #[test]
    fn test_later_handlers_see_cancellation() {
        let mut bus = EventBus::new();
        bus.subscribe_with_priority(EventPriority::High, |e: &mut Ping| e.set_cancelled(true));
        bus.subscribe(|e: &mut Ping| {
            if !e.is_cancelled() {
                e.seen.push("ran");
            }
        });

        let mut ping = Ping::default();
        bus.dispatch(&mut ping);
        assert!(ping.is_cancelled());
        assert!(ping.seen.is_empty());
    }
}
