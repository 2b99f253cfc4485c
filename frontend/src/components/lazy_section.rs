use std::rc::Rc;

use log::{error, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use crate::components::section_boundary::ErrorSink;
use crate::components::spinner::Spinner;
use crate::config::{DEFAULT_ROOT_MARGIN, DEFAULT_THRESHOLD, PLACEHOLDER_HEIGHT};
use crate::context::SiteContext;
use crate::lazy::mount::{IntersectionSample, MountCoordinator, MountOptions, MountView};
use crate::lazy::viewport;

#[derive(Properties, PartialEq)]
pub struct LazySectionProps {
    /// Logical section name handed to the loader.
    pub name: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<Html>,
    /// Shown while the section is loading. Defaults to a full-viewport spinner.
    #[prop_or_default]
    pub fallback: Option<Html>,
    #[prop_or(DEFAULT_THRESHOLD)]
    pub threshold: f64,
    #[prop_or_else(|| AttrValue::from(DEFAULT_ROOT_MARGIN))]
    pub root_margin: AttrValue,
    #[prop_or_else(|| AttrValue::from(PLACEHOLDER_HEIGHT))]
    pub min_height: AttrValue,
}

#[function_component(LazySection)]
pub fn lazy_section(props: &LazySectionProps) -> Html {
    let ctx = use_context::<SiteContext>().expect("SiteContext not provided");
    let sink = use_context::<ErrorSink>();
    let sentinel = use_node_ref();
    let mount = {
        let options = MountOptions::new(props.threshold, props.root_margin.to_string());
        use_mut_ref(move || MountCoordinator::new(options))
    };
    let view = use_state(|| MountView::Placeholder);

    {
        let mount = mount.clone();
        let view = view.clone();
        let sentinel = sentinel.clone();
        let name = props.name.clone();
        use_effect_with_deps(
            move |_| {
                let materialize: Rc<dyn Fn()> = {
                    let mount = mount.clone();
                    let name = name.clone();
                    Rc::new(move || {
                        view.set(MountView::Loading);
                        let load = ctx.prefetch.load(&name, ctx.loader.clone());
                        let mount = mount.clone();
                        let view = view.clone();
                        let sink = sink.clone();
                        let name = name.clone();
                        spawn_local(async move {
                            let result = load.await;
                            let outcome = mount.borrow_mut().resolve(result);
                            match outcome {
                                Ok(()) => view.set(mount.borrow().view()),
                                Err(e) => match &sink {
                                    Some(sink) => sink.report(e),
                                    None => {
                                        error!("section {} failed to load: {}", name, e);
                                        view.set(mount.borrow().view());
                                    }
                                },
                            }
                        });
                    })
                };

                let mut guard = None;
                let element = sentinel.cast::<Element>();
                if mount.borrow_mut().register() {
                    let options = mount.borrow().options().clone();
                    let observed = element.ok_or_else(|| JsValue::from_str("sentinel not attached")).and_then(|element| {
                        let mount = mount.clone();
                        let materialize = materialize.clone();
                        viewport::observe(&element, &options, move |sample| {
                            let triggered = mount.borrow_mut().on_intersection(sample).is_some();
                            if triggered {
                                materialize();
                            }
                            triggered
                        })
                    });
                    match observed {
                        Ok(observer) => guard = Some(observer),
                        Err(e) => {
                            // Without an observer there is nothing to wait for.
                            warn!("cannot observe section {} ({:?}), loading now", name, e);
                            let everything = IntersectionSample {
                                ratio: 1.0,
                                intersecting: true,
                            };
                            if mount.borrow_mut().on_intersection(everything).is_some() {
                                materialize();
                            }
                        }
                    }
                }
                move || drop(guard)
            },
            (),
        );
    }

    match &*view {
        MountView::Placeholder => html! {
            <div
                ref={sentinel}
                class="lazy-placeholder"
                style={format!("min-height: {};", props.min_height)}
                aria-hidden="true"
            >
                { props.placeholder.clone().unwrap_or_else(|| html! {}) }
            </div>
        },
        MountView::Loading => props
            .fallback
            .clone()
            .unwrap_or_else(|| html! { <Spinner /> }),
        MountView::Ready(section) => section.render(),
        MountView::Failed(_) => html! {
            <div class="section-error" role="alert" style={format!("min-height: {};", props.min_height)}>
                <p>{ "This section could not be loaded. Please refresh the page to try again." }</p>
            </div>
        },
    }
}
