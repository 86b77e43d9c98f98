//! Event Bus for publishing session notifications.
//!
//! The EventBus provides a push-based subscription model: UI projectors
//! register callbacks and the session reconciler dispatches every state
//! change to them, synchronously and in order.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::outbound::SessionNotification;

type Subscriber = Box<dyn FnMut(SessionNotification) + Send + 'static>;

/// Event bus for session notifications.
///
/// The bus holds strong references to subscribers, so they persist until
/// the last clone of the bus is dropped. Clones share the subscriber list.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl EventBus {
    /// Create a new EventBus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all notifications.
    pub fn subscribe(&self, callback: impl FnMut(SessionNotification) + Send + 'static) {
        self.lock().push(Box::new(callback));
    }

    /// Dispatch a notification to all subscribers.
    ///
    /// Each subscriber's callback is invoked with a clone of the notification.
    pub fn dispatch(&self, notification: SessionNotification) {
        for subscriber in self.lock().iter_mut() {
            subscriber(notification.clone());
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Subscriber>> {
        // A panicking subscriber must not silence the others.
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_subscribe_and_dispatch() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicU32::new(0));

        let count_clone = Arc::clone(&count);
        bus.subscribe(move |_notification| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.dispatch(SessionNotification::ConnectionClosed);
        bus.dispatch(SessionNotification::ConnectionClosed);

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_multiple_subscribers() {
        let bus = EventBus::new();
        let count1 = Arc::new(AtomicU32::new(0));
        let count2 = Arc::new(AtomicU32::new(0));

        let count1_clone = Arc::clone(&count1);
        bus.subscribe(move |_notification| {
            count1_clone.fetch_add(1, Ordering::SeqCst);
        });

        let count2_clone = Arc::clone(&count2);
        bus.subscribe(move |_notification| {
            count2_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.dispatch(SessionNotification::ConnectionClosed);

        assert_eq!(count1.load(Ordering::SeqCst), 1);
        assert_eq!(count2.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let bus = EventBus::new();
        let clone = bus.clone();
        let seen = Arc::new(AtomicU32::new(0));

        let seen_clone = Arc::clone(&seen);
        clone.subscribe(move |_| {
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });
        bus.dispatch(SessionNotification::ConnectionClosed);

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
