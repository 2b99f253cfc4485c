use yew::prelude::*;

use crate::components::animate::FadeIn;
use crate::components::hero::Hero;
use crate::components::lazy_section::LazySection;
use crate::components::section_boundary::SectionBoundary;
use crate::content::sections::HOME_SECTIONS;

#[function_component(Home)]
pub fn home() -> Html {
    // Scroll to top only on initial mount
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    let tagline: Vec<AttrValue> = vec![
        "get paid faster".into(),
        "see your runway".into(),
        "close the books".into(),
    ];

    html! {
        <div class="home-page">
            <Hero
                title="Business banking that helps you"
                rotating={tagline}
                cta_label={Some(AttrValue::from("Open an account"))}
                cta_href={Some(AttrValue::from("#cta"))}
            >
                <p>{"Payouts in minutes, invoices that chase themselves and a live view of your cash. Built for small teams."}</p>
            </Hero>
            <FadeIn>
                <p class="home-intro">
                    {"Trusted by 40,000 businesses. Regulated, safeguarded and refreshingly clear about fees."}
                </p>
            </FadeIn>
            { for HOME_SECTIONS.iter().map(|name| html! {
                <SectionBoundary key={*name}>
                    <LazySection name={*name} root_margin="200px" />
                </SectionBoundary>
            }) }
        </div>
    }
}
