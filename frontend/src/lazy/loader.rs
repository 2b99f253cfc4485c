use std::fmt;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};
use gloo_net::http::Request;
use log::debug;
use thiserror::Error;
use yew::prelude::*;

use crate::content::sections::{self, SectionContent};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("network error loading {name}: {reason}")]
    Network { name: String, reason: String },
    #[error("{name} responded with status {status}")]
    Status { name: String, status: u16 },
    #[error("could not decode {name}: {reason}")]
    Decode { name: String, reason: String },
    #[error("no section named {0}")]
    UnknownSection(String),
}

/// A materialized section: a cheap-to-clone view function.
#[derive(Clone)]
pub struct Renderable {
    name: AttrValue,
    view: Rc<dyn Fn() -> Html>,
}

impl Renderable {
    pub fn new<F>(name: impl Into<AttrValue>, view: F) -> Self
    where
        F: Fn() -> Html + 'static,
    {
        Self {
            name: name.into(),
            view: Rc::new(view),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self) -> Html {
        (self.view)()
    }
}

impl PartialEq for Renderable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Rc::ptr_eq(&self.view, &other.view)
    }
}

impl fmt::Debug for Renderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderable").field("name", &self.name).finish()
    }
}

pub type LoadFuture = LocalBoxFuture<'static, Result<Renderable, LoadError>>;

/// Produces renderable sections on demand.
pub trait ModuleLoader {
    fn load(&self, name: &str) -> LoadFuture;
}

/// Serves the sections compiled into the binary. Resolves immediately, so
/// prefetching against it only warms the cache.
pub struct RegistryLoader;

impl ModuleLoader for RegistryLoader {
    fn load(&self, name: &str) -> LoadFuture {
        let result = sections::builtin(name)
            .map(|content| renderable_from(name, content))
            .ok_or_else(|| LoadError::UnknownSection(name.to_string()));
        future::ready(result).boxed_local()
    }
}

/// Fetches `{base}/sections/{name}.json` and renders it with the shared
/// section layout.
pub struct RemoteLoader {
    base: String,
}

impl RemoteLoader {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn url_for(&self, name: &str) -> String {
        format!("{}/sections/{}.json", self.base, name)
    }
}

impl ModuleLoader for RemoteLoader {
    fn load(&self, name: &str) -> LoadFuture {
        let url = self.url_for(name);
        let name = name.to_string();
        async move {
            debug!("fetching section {} from {}", name, url);
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| LoadError::Network {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            if !response.ok() {
                return Err(LoadError::Status {
                    name,
                    status: response.status(),
                });
            }
            let content = response
                .json::<SectionContent>()
                .await
                .map_err(|e| LoadError::Decode {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            Ok(renderable_from(&name, content))
        }
        .boxed_local()
    }
}

fn renderable_from(name: &str, content: SectionContent) -> Renderable {
    let content = Rc::new(content);
    Renderable::new(name.to_string(), move || sections::render_section(&content))
}
