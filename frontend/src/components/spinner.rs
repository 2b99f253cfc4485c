use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SpinnerProps {
    #[prop_or(true)]
    pub full_viewport: bool,
}

/// Default loading affordance for lazily mounted sections.
#[function_component(Spinner)]
pub fn spinner(props: &SpinnerProps) -> Html {
    html! {
        <div
            class={classes!("spinner-wrap", props.full_viewport.then(|| "spinner-full"))}
            role="status"
            aria-live="polite"
        >
            <div class="spinner"></div>
            <span class="visually-hidden">{"Loading…"}</span>
        </div>
    }
}
