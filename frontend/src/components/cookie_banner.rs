use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::consent::hooks::{use_consent, use_consent_modal};
use crate::consent::store::{CookieCategory, CookieSettings, SettingsPatch};

/// Consent banner. Appears until a choice is made, and again whenever any
/// part of the page calls `open_consent_modal`.
#[function_component(CookieBanner)]
pub fn cookie_banner() -> Html {
    let consent = use_consent();
    let modal_open = use_consent_modal();
    let customizing = use_state(|| false);
    let draft = use_state(|| consent.record.settings);
    let settled = use_state(|| false);

    // Let the page paint before sliding the banner in
    {
        let settled = settled.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(400, move || settled.set(true));
                move || drop(timeout)
            },
            (),
        );
    }

    // Reopening starts from what is stored, not a stale draft
    {
        let draft = draft.clone();
        let customizing = customizing.clone();
        use_effect_with_deps(
            move |(open, settings)| {
                if *open {
                    draft.set(*settings);
                    customizing.set(true);
                }
                || ()
            },
            (*modal_open, consent.record.settings),
        );
    }

    let visible = !consent.record.has_chosen || *modal_open;
    if !visible {
        return html! {};
    }

    let close = {
        let modal_open = modal_open.clone();
        let customizing = customizing.clone();
        move || {
            modal_open.set(false);
            customizing.set(false);
        }
    };

    let accept_all = {
        let store = consent.store.clone();
        let close = close.clone();
        Callback::from(move |_: MouseEvent| {
            store.accept_all();
            close();
        })
    };

    let reject_optional = {
        let store = consent.store.clone();
        let close = close.clone();
        Callback::from(move |_: MouseEvent| {
            store.reject_optional();
            close();
        })
    };

    let save = {
        let store = consent.store.clone();
        let draft = draft.clone();
        let close = close.clone();
        Callback::from(move |_: MouseEvent| {
            let settings = CookieSettings {
                essential: true,
                ..*draft
            };
            store.update_settings(SettingsPatch::from_settings(settings));
            close();
        })
    };

    let toggle_customize = {
        let customizing = customizing.clone();
        Callback::from(move |_: MouseEvent| customizing.set(!*customizing))
    };

    let toggles = CookieCategory::ALL.iter().map(|category| {
        let category = *category;
        let locked = category == CookieCategory::Essential;
        let onchange = {
            let draft = draft.clone();
            Callback::from(move |_: Event| {
                let mut next = *draft;
                match category {
                    CookieCategory::Essential => {}
                    CookieCategory::Analytics => next.analytics = !next.analytics,
                    CookieCategory::Marketing => next.marketing = !next.marketing,
                }
                draft.set(next);
            })
        };
        html! {
            <label class="cookie-toggle" key={category.label()}>
                <input
                    type="checkbox"
                    checked={locked || (*draft).get(category)}
                    disabled={locked}
                    onchange={onchange}
                />
                <span class="cookie-toggle-label">{category.label()}</span>
                <span class="cookie-toggle-desc">{category.description()}</span>
            </label>
        }
    });

    html! {
        <div
            class={classes!("cookie-banner", (*settled).then(|| "is-open"), (*customizing).then(|| "is-expanded"))}
            role="dialog"
            aria-label="Cookie preferences"
        >
            <p class="cookie-banner-text">
                {"We use essential cookies to run this site. With your permission we also use analytics and marketing cookies."}
            </p>
            {
                if *customizing {
                    html! { <div class="cookie-toggles">{ for toggles }</div> }
                } else {
                    html! {}
                }
            }
            <div class="cookie-actions">
                <button class="cookie-secondary" onclick={reject_optional}>{"Reject optional"}</button>
                {
                    if *customizing {
                        html! { <button class="cookie-secondary" onclick={save}>{"Save choices"}</button> }
                    } else {
                        html! { <button class="cookie-secondary" onclick={toggle_customize}>{"Customize"}</button> }
                    }
                }
                <button class="cookie-primary" onclick={accept_all}>{"Accept all"}</button>
            </div>
        </div>
    }
}
