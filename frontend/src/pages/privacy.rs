use yew::prelude::*;

use crate::consent::hooks::use_consent;
use crate::consent::store::CookieCategory;

#[function_component(PrivacyPolicy)]
pub fn privacy_policy() -> Html {
    let consent = use_consent();

    let open_settings = {
        let store = consent.store.clone();
        Callback::from(move |_: MouseEvent| store.open_consent_modal())
    };

    let forget_choice = {
        let store = consent.store.clone();
        Callback::from(move |_: MouseEvent| store.reset_consent())
    };

    html! {
        <div class="legal-page">
            <h1>{"Privacy & Cookies"}</h1>
            <p>
                {"We collect the minimum data needed to provide our services and never sell it. This page explains the cookies we use and lets you change your mind at any time."}
            </p>
            <h2>{"Cookie categories"}</h2>
            <table class="cookie-table">
                <thead>
                    <tr><th>{"Category"}</th><th>{"Purpose"}</th><th>{"Status"}</th></tr>
                </thead>
                <tbody>
                    { for CookieCategory::ALL.iter().map(|category| html! {
                        <tr key={category.label()}>
                            <td>{category.label()}</td>
                            <td>{category.description()}</td>
                            <td>{ if consent.store.is_enabled(*category) { "Allowed" } else { "Off" } }</td>
                        </tr>
                    }) }
                </tbody>
            </table>
            <p class="legal-note">
                {
                    if consent.record.has_chosen {
                        "Your choice is saved in this browser."
                    } else {
                        "You have not made a choice yet, so only essential cookies are active."
                    }
                }
            </p>
            <div class="legal-actions">
                <button class="cookie-primary" onclick={open_settings}>{"Cookie settings"}</button>
                <button class="cookie-secondary" onclick={forget_choice}>{"Forget my choice"}</button>
            </div>
        </div>
    }
}
