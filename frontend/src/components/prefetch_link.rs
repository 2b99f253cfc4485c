use log::debug;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::components::Link;

use crate::context::SiteContext;
use crate::Route;

#[derive(Clone, PartialEq)]
pub struct PrefetchHandlers {
    pub onmouseenter: Callback<MouseEvent>,
    pub onfocus: Callback<FocusEvent>,
}

/// Hover and focus handlers that warm the prefetch cache for `name`.
/// Only the first trigger per page session starts a fetch.
#[hook]
pub fn use_prefetch(name: AttrValue) -> PrefetchHandlers {
    let ctx = use_context::<SiteContext>().expect("SiteContext not provided");

    let trigger = Callback::from(move |_: ()| {
        let loader = ctx.loader.clone();
        let target = name.clone();
        if let Some(driver) = ctx.prefetch.prefetch(&name, move || loader.load(&target)) {
            debug!("prefetching section {}", name);
            spawn_local(driver);
        }
    });

    PrefetchHandlers {
        onmouseenter: trigger.reform(|_: MouseEvent| ()),
        onfocus: trigger.reform(|_: FocusEvent| ()),
    }
}

#[derive(Properties, PartialEq)]
pub struct PrefetchLinkProps {
    pub to: Route,
    /// Section to warm when the pointer or keyboard focus reaches the link.
    pub prefetch: AttrValue,
    #[prop_or_default]
    pub classes: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(PrefetchLink)]
pub fn prefetch_link(props: &PrefetchLinkProps) -> Html {
    let handlers = use_prefetch(props.prefetch.clone());

    // focus does not bubble, focusin does
    html! {
        <span
            class="prefetch-link"
            onmouseenter={handlers.onmouseenter}
            onfocusin={handlers.onfocus}
        >
            <Link<Route> to={props.to.clone()} classes={props.classes.clone()}>
                { for props.children.iter() }
            </Link<Route>>
        </span>
    }
}
