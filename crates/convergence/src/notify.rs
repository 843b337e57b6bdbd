//! Notification bus - publish/subscribe channel for convergence events.
//!
//! The executor publishes "resource changed" events; dependent consumers
//! (a version-change logger, for example) subscribe by event name.
//! Delivery is at-least-once within a single convergence run; nothing is
//! persisted across runs.

use crate::types::Action;

/// An event published during plan application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    /// Event name subscribers key on
    pub name: String,
    /// The plan action that produced this event
    pub triggered_by: Action,
}

type Handler = Box<dyn Fn(&NotificationEvent)>;

/// In-process publish/subscribe bus keyed by event name.
#[derive(Default)]
pub struct NotificationBus {
    subscribers: Vec<(String, Handler)>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for events with the given name.
    ///
    /// Multiple handlers per name are allowed; each receives every matching
    /// event in subscription order.
    pub fn subscribe(&mut self, event_name: impl Into<String>, handler: impl Fn(&NotificationEvent) + 'static) {
        self.subscribers.push((event_name.into(), Box::new(handler)));
    }

    /// Deliver an event to every matching subscriber.
    ///
    /// Returns the number of handlers invoked.
    pub fn publish(&self, event: &NotificationEvent) -> usize {
        let mut delivered = 0;
        for (name, handler) in &self.subscribers {
            if name == &event.name {
                handler(event);
                delivered += 1;
            }
        }
        delivered
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
