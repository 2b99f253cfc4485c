use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InfoCardProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub icon: Option<String>,
    #[prop_or_default]
    pub href: Option<String>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(InfoCard)]
pub fn info_card(props: &InfoCardProps) -> Html {
    let body = html! {
        <>
            {
                if let Some(icon) = &props.icon {
                    html! { <i class={classes!("fa-solid", icon.clone(), "info-card-icon")}></i> }
                } else {
                    html! {}
                }
            }
            <h3>{&props.title}</h3>
            <div class="info-card-body">
                { for props.children.iter() }
            </div>
        </>
    };

    match &props.href {
        Some(href) => html! {
            <a class="info-card info-card-link" href={href.clone()}>{body}</a>
        },
        None => html! {
            <div class="info-card">{body}</div>
        },
    }
}
