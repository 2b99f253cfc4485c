use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use log::{debug, warn};

use crate::lazy::loader::{LoadFuture, ModuleLoader};

/// Section fetches started by prefetch or mount, keyed by logical name.
///
/// One entry per name for the whole page session. The presence check and
/// the insert happen synchronously before any fetch is polled, so bursts of
/// hover/focus events cannot start a second fetch.
#[derive(Clone, Default)]
pub struct PrefetchCache {
    entries: Rc<RefCell<HashMap<String, Shared<LoadFuture>>>>,
}

impl PrefetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `fetch` unless `name` was already requested. Returns the
    /// driver future to spawn; it never fails, prefetch errors are only
    /// logged.
    pub fn prefetch<F>(&self, name: &str, fetch: F) -> Option<LocalBoxFuture<'static, ()>>
    where
        F: FnOnce() -> LoadFuture,
    {
        if self.entries.borrow().contains_key(name) {
            return None;
        }
        let shared = fetch().shared();
        self.entries
            .borrow_mut()
            .insert(name.to_string(), shared.clone());

        let name = name.to_string();
        Some(
            async move {
                match shared.await {
                    Ok(_) => debug!("prefetched section {}", name),
                    Err(e) => warn!("prefetch of {} failed: {}", name, e),
                }
            }
            .boxed_local(),
        )
    }

    /// The authoritative load. Joins an in-flight or finished fetch when
    /// there is one, otherwise starts one and records it so later prefetches
    /// of the same name are no-ops. A failed fetch that this call merely
    /// joined falls through to a fresh load so the caller sees the real
    /// outcome.
    pub fn load(&self, name: &str, loader: Rc<dyn ModuleLoader>) -> LoadFuture {
        let cached = self.entries.borrow().get(name).cloned();
        let Some(joined) = cached else {
            return self.start(name, loader.as_ref()).boxed_local();
        };

        let cache = self.clone();
        let name = name.to_string();
        async move {
            match joined.clone().await {
                Ok(section) => Ok(section),
                Err(e) => {
                    debug!("earlier fetch of {} had failed ({}), loading again", name, e);
                    cache.retry(&name, &joined, loader.as_ref()).await
                }
            }
        }
        .boxed_local()
    }

    fn start(&self, name: &str, loader: &dyn ModuleLoader) -> Shared<LoadFuture> {
        let shared = loader.load(name).shared();
        self.entries
            .borrow_mut()
            .insert(name.to_string(), shared.clone());
        shared
    }

    /// Replaces the failed entry with a fresh fetch, unless another caller
    /// already did.
    fn retry(&self, name: &str, failed: &Shared<LoadFuture>, loader: &dyn ModuleLoader) -> Shared<LoadFuture> {
        let current = self.entries.borrow().get(name).cloned();
        match current {
            Some(current) if !Shared::ptr_eq(&current, failed) => current,
            _ => self.start(name, loader),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.borrow().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::loader::LoadError;
    use crate::lazy::testing::GatedLoader;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;

    #[test]
    fn repeated_triggers_start_one_fetch() {
        let mut pool = LocalPool::new();
        let cache = PrefetchCache::new();
        let loader = Rc::new(GatedLoader::default());

        for _ in 0..6 {
            if let Some(driver) = cache.prefetch("pricing", || loader.load("pricing")) {
                pool.spawner().spawn_local(driver).unwrap();
            }
            pool.run_until_stalled();
        }
        assert_eq!(loader.calls("pricing"), 1);

        loader.resolve_ok("pricing");
        pool.run_until_stalled();
        assert!(cache.prefetch("pricing", || loader.load("pricing")).is_none());
        assert_eq!(loader.calls("pricing"), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn names_are_independent() {
        let cache = PrefetchCache::new();
        let loader = Rc::new(GatedLoader::default());
        assert!(cache.prefetch("faq", || loader.load("faq")).is_some());
        assert!(cache.prefetch("press", || loader.load("press")).is_some());
        assert!(cache.contains("faq") && cache.contains("press"));
    }

    #[test]
    fn load_joins_an_in_flight_prefetch() {
        let mut pool = LocalPool::new();
        let cache = PrefetchCache::new();
        let loader = Rc::new(GatedLoader::default());
        let dyn_loader: Rc<dyn ModuleLoader> = loader.clone();

        let driver = cache.prefetch("stats", || loader.load("stats")).unwrap();
        pool.spawner().spawn_local(driver).unwrap();
        let real = cache.load("stats", dyn_loader);

        loader.resolve_ok("stats");
        let section = pool.run_until(real).unwrap();
        assert_eq!(section.name(), "stats");
        assert_eq!(loader.calls("stats"), 1);
    }

    #[test]
    fn failed_prefetch_is_swallowed_and_load_retries() {
        let mut pool = LocalPool::new();
        let cache = PrefetchCache::new();
        let loader = Rc::new(GatedLoader::default());
        let dyn_loader: Rc<dyn ModuleLoader> = loader.clone();

        let driver = cache.prefetch("cta", || loader.load("cta")).unwrap();
        loader.resolve_err(
            "cta",
            LoadError::Network {
                name: "cta".to_string(),
                reason: "offline".to_string(),
            },
        );
        // completes without panicking or surfacing the error
        pool.run_until(driver);

        let real = cache.load("cta", dyn_loader);
        let mut real = Box::pin(real);
        assert!(pool.run_until(futures::future::poll_immediate(&mut real)).is_none());
        loader.resolve_ok("cta");
        assert!(pool.run_until(real).is_ok());
        assert_eq!(loader.calls("cta"), 2);
        assert!(cache.contains("cta"));
        assert!(cache.prefetch("cta", || loader.load("cta")).is_none());
        assert_eq!(loader.calls("cta"), 2);
    }

    #[test]
    fn load_without_prefetch_is_recorded() {
        let mut pool = LocalPool::new();
        let cache = PrefetchCache::new();
        let loader = Rc::new(GatedLoader::default());
        let dyn_loader: Rc<dyn ModuleLoader> = loader.clone();

        let real = cache.load("faq", dyn_loader);
        loader.resolve_ok("faq");
        assert!(pool.run_until(real).is_ok());
        assert!(cache.contains("faq"));

        assert!(cache.prefetch("faq", || loader.load("faq")).is_none());
        assert_eq!(loader.calls("faq"), 1);
    }

    #[test]
    fn hover_during_a_mount_load_joins_it() {
        let mut pool = LocalPool::new();
        let cache = PrefetchCache::new();
        let loader = Rc::new(GatedLoader::default());
        let dyn_loader: Rc<dyn ModuleLoader> = loader.clone();

        let real = cache.load("features", dyn_loader);
        assert!(cache.prefetch("features", || loader.load("features")).is_none());
        assert_eq!(loader.calls("features"), 1);

        loader.resolve_ok("features");
        let section = pool.run_until(real).unwrap();
        assert_eq!(section.name(), "features");
        assert_eq!(loader.calls("features"), 1);
    }

    #[test]
    fn failed_direct_load_is_not_retried() {
        let mut pool = LocalPool::new();
        let cache = PrefetchCache::new();
        let loader = Rc::new(GatedLoader::default());
        let dyn_loader: Rc<dyn ModuleLoader> = loader.clone();

        let real = cache.load("press", dyn_loader);
        loader.resolve_err(
            "press",
            LoadError::Status {
                name: "press".to_string(),
                status: 500,
            },
        );
        assert!(pool.run_until(real).is_err());
        assert_eq!(loader.calls("press"), 1);
        assert!(cache.prefetch("press", || loader.load("press")).is_none());
    }
}
