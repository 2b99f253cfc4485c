use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use crate::consent::store::ConsentRecord;

/// Events shared across the page without components holding references to
/// each other.
#[derive(Clone, Debug, PartialEq)]
pub enum SiteEvent {
    ConsentChanged(ConsentRecord),
    OpenConsentModal,
}

impl SiteEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SiteEvent::ConsentChanged(_) => "cookie-settings-changed",
            SiteEvent::OpenConsentModal => "open-cookie-modal",
        }
    }
}

type Listener = Rc<dyn Fn(&SiteEvent)>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Synchronous publish/subscribe bus, one per page session.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SiteEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Delivers `event` to every listener registered when the call starts.
    /// The listener list is snapshotted so listeners may (un)subscribe
    /// while being notified.
    pub fn publish(&self, event: SiteEvent) {
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        debug!("publishing {} to {} listeners", event.name(), listeners.len());
        for listener in listeners {
            listener(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn same_bus(&self, other: &EventBus) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Unregisters its listener when dropped.
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<BusInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            if let Ok(mut inner) = bus.try_borrow_mut() {
                inner.listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn both_subscribers_see_the_same_publish() {
        let bus = EventBus::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let _a = {
            let first = first.clone();
            bus.subscribe(move |_| first.set(first.get() + 1))
        };
        let _b = {
            let second = second.clone();
            bus.subscribe(move |_| second.set(second.get() + 1))
        };

        bus.publish(SiteEvent::OpenConsentModal);
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn dropping_subscription_stops_delivery() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let sub = {
            let hits = hits.clone();
            bus.subscribe(move |_| hits.set(hits.get() + 1))
        };
        bus.publish(SiteEvent::OpenConsentModal);
        drop(sub);
        bus.publish(SiteEvent::OpenConsentModal);

        assert_eq!(hits.get(), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn listener_may_subscribe_during_delivery() {
        let bus = EventBus::new();
        let late: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let bus = bus.clone();
            let late = late.clone();
            bus.clone().subscribe(move |_| {
                late.borrow_mut().push(bus.subscribe(|_| {}));
            })
        };

        bus.publish(SiteEvent::OpenConsentModal);
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn event_names_are_stable() {
        assert_eq!(SiteEvent::OpenConsentModal.name(), "open-cookie-modal");
        assert_eq!(
            SiteEvent::ConsentChanged(ConsentRecord::default()).name(),
            "cookie-settings-changed"
        );
    }
}
