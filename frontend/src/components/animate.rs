use gloo_timers::callback::Interval;
use log::debug;
use web_sys::Element;
use yew::prelude::*;

use crate::config::{DEFAULT_THRESHOLD, TAGLINE_INTERVAL_MS};
use crate::lazy::mount::MountOptions;
use crate::lazy::viewport;

#[derive(Properties, PartialEq)]
pub struct FadeInProps {
    #[prop_or(DEFAULT_THRESHOLD)]
    pub threshold: f64,
    #[prop_or_default]
    pub delay_ms: u32,
    #[prop_or_default]
    pub children: Children,
}

/// Fades its children in the first time they scroll into view.
#[function_component(FadeIn)]
pub fn fade_in(props: &FadeInProps) -> Html {
    let node = use_node_ref();
    let shown = use_state(|| false);

    {
        let node = node.clone();
        let shown = shown.clone();
        let threshold = props.threshold;
        use_effect_with_deps(
            move |_| {
                let mut guard = None;
                match node.cast::<Element>() {
                    Some(element) => {
                        let options = MountOptions::new(threshold, "0px");
                        let reveal = shown.clone();
                        let observed = viewport::observe(&element, &options, move |sample| {
                            let crossed = sample.crosses(threshold);
                            if crossed {
                                reveal.set(true);
                            }
                            crossed
                        });
                        match observed {
                            Ok(observer) => guard = Some(observer),
                            Err(e) => {
                                debug!("no intersection observer ({:?}), showing content", e);
                                shown.set(true);
                            }
                        }
                    }
                    None => shown.set(true),
                }
                move || drop(guard)
            },
            (),
        );
    }

    html! {
        <div
            ref={node}
            class={classes!("fade-in", (*shown).then(|| "is-visible"))}
            style={format!("transition-delay: {}ms;", props.delay_ms)}
        >
            { for props.children.iter() }
        </div>
    }
}

pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

#[derive(Properties, PartialEq)]
pub struct RotatingTextProps {
    pub words: Vec<AttrValue>,
    #[prop_or(TAGLINE_INTERVAL_MS)]
    pub interval_ms: u32,
}

/// Cycles through `words`, re-keying the span so the CSS animation replays.
#[function_component(RotatingText)]
pub fn rotating_text(props: &RotatingTextProps) -> Html {
    let index = use_state(|| 0usize);

    {
        let index = index.clone();
        let len = props.words.len();
        use_effect_with_deps(
            move |(len, interval_ms)| {
                let len = *len;
                let interval = (len > 1).then(|| {
                    let current = index.clone();
                    let mut position = *current;
                    Interval::new(*interval_ms, move || {
                        position = next_index(position, len);
                        current.set(position);
                    })
                });
                move || drop(interval)
            },
            (len, props.interval_ms),
        );
    }

    let word = props
        .words
        .get(*index)
        .cloned()
        .unwrap_or_else(|| AttrValue::from(""));

    html! {
        <span class="rotating-text" key={*index} aria-live="polite">{word}</span>
    }
}
