//! Test doubles for the lazy loading layer.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use futures::channel::oneshot;
use futures::future::FutureExt;
use yew::html;

use crate::lazy::loader::{LoadError, LoadFuture, ModuleLoader, Renderable};

type Gate = oneshot::Sender<Result<Renderable, LoadError>>;

/// Loader whose fetches stay pending until the test resolves them.
#[derive(Default)]
pub struct GatedLoader {
    calls: RefCell<HashMap<String, usize>>,
    gates: RefCell<HashMap<String, VecDeque<Gate>>>,
}

impl GatedLoader {
    pub fn calls(&self, name: &str) -> usize {
        self.calls.borrow().get(name).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().values().sum()
    }

    pub fn resolve_ok(&self, name: &str) {
        let section = Renderable::new(name.to_string(), || html! {});
        self.resolve(name, Ok(section));
    }

    pub fn resolve_err(&self, name: &str, error: LoadError) {
        self.resolve(name, Err(error));
    }

    fn resolve(&self, name: &str, result: Result<Renderable, LoadError>) {
        let gate = self
            .gates
            .borrow_mut()
            .get_mut(name)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| panic!("no pending load for {}", name));
        let _ = gate.send(result);
    }
}

impl ModuleLoader for GatedLoader {
    fn load(&self, name: &str) -> LoadFuture {
        *self.calls.borrow_mut().entry(name.to_string()).or_insert(0) += 1;
        let (tx, rx) = oneshot::channel();
        self.gates
            .borrow_mut()
            .entry(name.to_string())
            .or_default()
            .push_back(tx);
        let name = name.to_string();
        async move {
            rx.await.unwrap_or_else(|_| {
                Err(LoadError::Network {
                    name,
                    reason: "gate dropped".to_string(),
                })
            })
        }
        .boxed_local()
    }
}
