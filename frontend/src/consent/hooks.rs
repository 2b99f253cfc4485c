use std::rc::Rc;

use yew::prelude::*;

use crate::bus::{EventBus, SiteEvent, Subscription};
use crate::consent::store::{ConsentRecord, ConsentStore};
use crate::context::SiteContext;

#[derive(Clone)]
pub struct UseConsentHandle {
    pub record: ConsentRecord,
    pub store: ConsentStore,
}

/// Current consent record, re-rendering whenever any component updates it.
#[hook]
pub fn use_consent() -> UseConsentHandle {
    let ctx = use_context::<SiteContext>().expect("SiteContext not provided");
    let record = use_state(|| ctx.consent.get_settings());

    {
        let record = record.clone();
        let bus = ctx.bus.clone();
        let store = ctx.consent.clone();
        use_effect_with_deps(
            move |_| {
                let subscription = follow_consent(&bus, &store, move |updated| record.set(updated));
                move || drop(subscription)
            },
            (),
        );
    }

    UseConsentHandle {
        record: *record,
        store: ctx.consent.clone(),
    }
}

/// Subscribes `on_change` to consent updates, then hands it the current
/// record so anything published before the subscription is not missed.
fn follow_consent<F>(bus: &EventBus, store: &ConsentStore, on_change: F) -> Subscription
where
    F: Fn(ConsentRecord) + 'static,
{
    let on_change = Rc::new(on_change);
    let subscription = {
        let on_change = on_change.clone();
        bus.subscribe(move |event| {
            if let SiteEvent::ConsentChanged(updated) = event {
                on_change(*updated);
            }
        })
    };
    on_change(store.get_settings());
    subscription
}

/// Visibility of the consent dialog. Flips to `true` whenever someone calls
/// `open_consent_modal`.
#[hook]
pub fn use_consent_modal() -> UseStateHandle<bool> {
    let ctx = use_context::<SiteContext>().expect("SiteContext not provided");
    let open = use_state(|| false);

    {
        let open = open.clone();
        let bus = ctx.bus.clone();
        use_effect_with_deps(
            move |_| {
                let subscription = bus.subscribe(move |event| {
                    if *event == SiteEvent::OpenConsentModal {
                        open.set(true);
                    }
                });
                move || drop(subscription)
            },
            (),
        );
    }

    open
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consent::storage::MemoryStorage;
    use crate::consent::store::SettingsPatch;
    use std::cell::RefCell;

    #[test]
    fn update_before_subscribing_is_picked_up() {
        let bus = EventBus::new();
        let store = ConsentStore::new(Rc::new(MemoryStorage::new()), bus.clone());
        let rendered = store.get_settings();

        // Lands between the first render and the effect.
        let updated = store.update_settings(SettingsPatch::new().analytics(true));
        assert_ne!(rendered, updated);

        let seen: Rc<RefCell<Vec<ConsentRecord>>> = Rc::new(RefCell::new(Vec::new()));
        let _subscription = {
            let seen = seen.clone();
            follow_consent(&bus, &store, move |record| seen.borrow_mut().push(record))
        };
        assert_eq!(seen.borrow().as_slice(), &[updated]);

        let later = store.reject_optional();
        assert_eq!(seen.borrow().as_slice(), &[updated, later]);
    }

    #[test]
    fn dropping_the_subscription_stops_updates() {
        let bus = EventBus::new();
        let store = ConsentStore::new(Rc::new(MemoryStorage::new()), bus.clone());
        let count = Rc::new(RefCell::new(0));

        let subscription = {
            let count = count.clone();
            follow_consent(&bus, &store, move |_| *count.borrow_mut() += 1)
        };
        drop(subscription);
        store.accept_all();

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.listener_count(), 0);
    }
}
