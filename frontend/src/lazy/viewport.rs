use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::lazy::mount::{IntersectionSample, MountOptions};

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Shared between the observer callback and its guard; whichever side gets
/// there first performs the one disconnect.
#[derive(Clone, Default)]
struct DisconnectOnce {
    done: Rc<Cell<bool>>,
}

impl DisconnectOnce {
    fn claim(&self) -> bool {
        !self.done.replace(true)
    }
}

/// Keeps an `IntersectionObserver` and its callback alive. Disconnects on drop
/// unless the callback already did.
pub struct ObserverGuard {
    observer: IntersectionObserver,
    disconnect: DisconnectOnce,
    _callback: ObserverCallback,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        if self.disconnect.claim() {
            self.observer.disconnect();
        }
    }
}

/// Watches `target` and feeds every entry to `on_sample`. Returning `true`
/// from `on_sample` disconnects the observer for good.
pub fn observe<F>(target: &Element, options: &MountOptions, mut on_sample: F) -> Result<ObserverGuard, JsValue>
where
    F: FnMut(IntersectionSample) -> bool + 'static,
{
    let disconnect = DisconnectOnce::default();
    let on_trigger = disconnect.clone();
    let callback = ObserverCallback::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            let sample = IntersectionSample {
                ratio: entry.intersection_ratio(),
                intersecting: entry.is_intersecting(),
            };
            if on_sample(sample) {
                if on_trigger.claim() {
                    observer.disconnect();
                }
                break;
            }
        }
    });

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    observer.observe(target);

    Ok(ObserverGuard {
        observer,
        disconnect,
        _callback: callback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_first_side_disconnects() {
        let guard_side = DisconnectOnce::default();
        let callback_side = guard_side.clone();

        assert!(callback_side.claim());
        assert!(!guard_side.claim());
        assert!(!callback_side.claim());
    }

    #[test]
    fn guard_disconnects_when_nothing_triggered() {
        let guard_side = DisconnectOnce::default();
        assert!(guard_side.claim());
    }
}
