use std::rc::Rc;

use log::info;

use crate::bus::EventBus;
use crate::config;
use crate::consent::storage::PreferenceStorage;
use crate::consent::store::ConsentStore;
use crate::lazy::loader::{ModuleLoader, RegistryLoader, RemoteLoader};
use crate::lazy::prefetch::PrefetchCache;

/// Page session services handed to components through a `ContextProvider`.
///
/// Built once in `App`; clones share the same bus, cache and store.
#[derive(Clone)]
pub struct SiteContext {
    pub bus: EventBus,
    pub prefetch: PrefetchCache,
    pub loader: Rc<dyn ModuleLoader>,
    pub consent: ConsentStore,
    pub storage: Rc<dyn PreferenceStorage>,
}

impl SiteContext {
    pub fn new(loader: Rc<dyn ModuleLoader>, storage: Rc<dyn PreferenceStorage>) -> Self {
        let bus = EventBus::new();
        let consent = ConsentStore::new(storage.clone(), bus.clone());
        Self {
            bus,
            prefetch: PrefetchCache::new(),
            loader,
            consent,
            storage,
        }
    }

    pub fn from_config(storage: Rc<dyn PreferenceStorage>) -> Self {
        let loader: Rc<dyn ModuleLoader> = match config::content_base_url() {
            Some(base) => {
                info!("Loading sections from {}", base);
                Rc::new(RemoteLoader::new(base))
            }
            None => Rc::new(RegistryLoader),
        };
        Self::new(loader, storage)
    }
}

impl PartialEq for SiteContext {
    fn eq(&self, other: &Self) -> bool {
        self.bus.same_bus(&other.bus) && self.consent == other.consent
    }
}
