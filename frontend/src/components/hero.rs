use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::animate::RotatingText;

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub rotating: Vec<AttrValue>,
    #[prop_or_default]
    pub cta_label: Option<AttrValue>,
    #[prop_or_default]
    pub cta_href: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

pub fn dim_for_scroll(scroll_y: f64) -> f64 {
    (scroll_y / 500.0).clamp(0.0, 1.0) * 0.6
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let (_, scroll_y) = use_window_scroll();
    let dim = dim_for_scroll(scroll_y);

    html! {
        <header class="hero" id="top">
            <div class="hero-background"></div>
            <div class="hero-overlay" style={format!("opacity: {};", dim)}></div>
            <div class="hero-content">
                <h1 class="hero-title">
                    {&props.title}
                    {
                        if props.rotating.is_empty() {
                            html! {}
                        } else {
                            html! {
                                <>
                                    <br />
                                    <RotatingText words={props.rotating.clone()} />
                                </>
                            }
                        }
                    }
                </h1>
                <div class="hero-subtitle">
                    { for props.children.iter() }
                </div>
                {
                    match (&props.cta_label, &props.cta_href) {
                        (Some(label), Some(href)) => html! {
                            <a class="hero-cta" href={href.clone()}>{label.clone()}</a>
                        },
                        _ => html! {},
                    }
                }
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::dim_for_scroll;

    #[test]
    fn dimming_caps_out() {
        assert_eq!(dim_for_scroll(0.0), 0.0);
        assert!((dim_for_scroll(250.0) - 0.3).abs() < 1e-9);
        assert!((dim_for_scroll(5000.0) - 0.6).abs() < 1e-9);
    }
}
