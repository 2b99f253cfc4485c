use log::error;
use yew::prelude::*;

use crate::lazy::loader::LoadError;

/// Where lazily mounted sections report load failures.
#[derive(Clone, PartialEq)]
pub struct ErrorSink(pub Callback<LoadError>);

impl ErrorSink {
    pub fn report(&self, error: LoadError) {
        self.0.emit(error);
    }
}

#[derive(Properties, PartialEq)]
pub struct SectionBoundaryProps {
    #[prop_or_default]
    pub children: Children,
}

/// Replaces its children with a generic failure notice once any section
/// inside reports a load error.
#[function_component(SectionBoundary)]
pub fn section_boundary(props: &SectionBoundaryProps) -> Html {
    let failure = use_state(|| None::<LoadError>);

    let sink = {
        let failure = failure.clone();
        use_memo(
            move |_| {
                ErrorSink(Callback::from(move |e: LoadError| {
                    error!("section failed to load: {}", e);
                    failure.set(Some(e));
                }))
            },
            (),
        )
    };

    if failure.is_some() {
        return html! {
            <div class="section-error" role="alert">
                <p>{"This part of the page couldn't be loaded. Please refresh to try again."}</p>
            </div>
        };
    }

    html! {
        <ContextProvider<ErrorSink> context={(*sink).clone()}>
            { for props.children.iter() }
        </ContextProvider<ErrorSink>>
    }
}
