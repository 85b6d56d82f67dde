//! Lightweight pub/sub bus connecting models to views.
//!
//! Models (and timeline-fired frames) post [`Event`]s; any registered
//! listener receives them synchronously, in registration order, with no
//! buffering. Delivery iterates over a snapshot of the listener list taken
//! at the start of `post`, so listeners may register or unregister while an
//! event is being delivered, and registration from another thread never
//! blocks behind a slow listener callback.

use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;

use crate::event::Event;

/// Capability interface for visualization event consumers.
///
/// Callbacks run on whatever thread posted the event; implementations must
/// do their own marshaling if they are bound to a rendering context, and
/// must not assume exclusive access to shared state.
pub trait EventListener: Send + Sync {
    /// Called for every event delivered by the bus.
    fn on_event(&self, event: &Event);

    /// Called when the driving session is reset. Default is a no-op;
    /// override if the listener holds per-run state to clear.
    fn on_reset(&self) {}
}

/// Synchronous in-order multicast of [`Event`]s.
#[derive(Default)]
pub struct EventBus {
    listeners: Mutex<Vec<Arc<dyn EventListener>>>,
}

impl EventBus {
    /// Create a new bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide shared bus.
    ///
    /// Purely a convenience; the core contracts only ever take an explicitly
    /// injected bus.
    pub fn global() -> &'static EventBus {
        static GLOBAL: OnceLock<EventBus> = OnceLock::new();
        GLOBAL.get_or_init(EventBus::new)
    }

    /// Register a listener if it is not already present.
    ///
    /// Registration is idempotent: re-registering the same listener (by
    /// identity) is a no-op, so each `post` delivers at most once to it.
    pub fn register(&self, listener: Arc<dyn EventListener>) {
        let mut listeners = self.listeners.lock().unwrap();
        if !listeners.iter().any(|l| same_listener(l, &listener)) {
            listeners.push(listener);
            debug!(count = listeners.len(), "bus: listener registered");
        }
    }

    /// Remove a previously registered listener. No-op if absent.
    pub fn unregister(&self, listener: &Arc<dyn EventListener>) {
        let mut listeners = self.listeners.lock().unwrap();
        listeners.retain(|l| !same_listener(l, listener));
    }

    /// Deliver `event` to every currently registered listener, in
    /// registration order, synchronously on the calling thread.
    pub fn post(&self, event: &Event) {
        debug!(kind = %event.kind(), "bus: post");
        for listener in self.snapshot() {
            listener.on_event(event);
        }
    }

    /// Notify all listeners that the session has been reset.
    pub fn notify_reset(&self) {
        debug!("bus: reset notification");
        for listener in self.snapshot() {
            listener.on_reset();
        }
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    fn snapshot(&self) -> Vec<Arc<dyn EventListener>> {
        self.listeners.lock().unwrap().clone()
    }
}

/// Identity comparison for trait-object listeners (data pointer only).
fn same_listener(a: &Arc<dyn EventListener>, b: &Arc<dyn EventListener>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a).cast::<()>(),
        Arc::as_ptr(b).cast::<()>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Event>>,
        resets: Mutex<usize>,
    }

    impl EventListener for Recorder {
        fn on_event(&self, event: &Event) {
            self.seen.lock().unwrap().push(event.clone());
        }

        fn on_reset(&self) {
            *self.resets.lock().unwrap() += 1;
        }
    }

    #[test]
    fn test_register_is_idempotent() {
        let bus = EventBus::new();
        let rec = Arc::new(Recorder::default());
        bus.register(rec.clone());
        bus.register(rec.clone());
        assert_eq!(bus.listener_count(), 1);

        bus.post(&Event::compare(0));
        assert_eq!(rec.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_delivery_in_registration_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        struct Tagged {
            tag: u8,
            order: Arc<Mutex<Vec<u8>>>,
        }
        impl EventListener for Tagged {
            fn on_event(&self, _event: &Event) {
                self.order.lock().unwrap().push(self.tag);
            }
        }

        for tag in [1u8, 2, 3] {
            bus.register(Arc::new(Tagged {
                tag,
                order: order.clone(),
            }));
        }
        bus.post(&Event::visit(0));
        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_unregister_removes_listener() {
        let bus = EventBus::new();
        let rec: Arc<dyn EventListener> = Arc::new(Recorder::default());
        bus.register(rec.clone());
        bus.unregister(&rec);
        assert_eq!(bus.listener_count(), 0);

        // Absent listener is a no-op.
        bus.unregister(&rec);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_register_during_post() {
        struct SelfExpanding {
            bus: Arc<EventBus>,
            extra: Arc<Recorder>,
        }
        impl EventListener for SelfExpanding {
            fn on_event(&self, _event: &Event) {
                self.bus.register(self.extra.clone());
            }
        }

        let bus = Arc::new(EventBus::new());
        let extra = Arc::new(Recorder::default());
        bus.register(Arc::new(SelfExpanding {
            bus: bus.clone(),
            extra: extra.clone(),
        }));

        // The snapshot taken at the start of post does not include `extra`,
        // so the first post only grows the set.
        bus.post(&Event::compare(1));
        assert!(extra.seen.lock().unwrap().is_empty());
        assert_eq!(bus.listener_count(), 2);

        bus.post(&Event::compare(2));
        let seen = extra.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind(), EventKind::Compare);
    }

    #[test]
    fn test_notify_reset_reaches_all_listeners() {
        let bus = EventBus::new();
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());
        bus.register(a.clone());
        bus.register(b.clone());
        bus.notify_reset();
        assert_eq!(*a.resets.lock().unwrap(), 1);
        assert_eq!(*b.resets.lock().unwrap(), 1);
    }

    #[test]
    fn test_global_bus_is_shared() {
        assert!(std::ptr::eq(EventBus::global(), EventBus::global()));
    }
}
