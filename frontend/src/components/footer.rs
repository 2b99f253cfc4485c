use yew::prelude::*;
use yew_router::components::Link;

use crate::consent::hooks::use_consent;
use crate::Route;

#[function_component(Footer)]
pub fn footer() -> Html {
    let consent = use_consent();
    let open_settings = {
        let store = consent.store.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            store.open_consent_modal();
        })
    };

    html! {
        <footer class="site-footer">
            <div class="footer-content">
                <span class="footer-brand">{"ledgerline"}</span>
                <nav class="footer-links">
                    <Link<Route> to={Route::Blog}>{"Blog"}</Link<Route>>
                    <Link<Route> to={Route::Privacy}>{"Privacy"}</Link<Route>>
                    <a href="#" onclick={open_settings}>{"Cookie settings"}</a>
                </nav>
                <p class="footer-legal">
                    {"Ledgerline is a financial technology company, not a bank. Banking services are provided by our regulated partner banks."}
                </p>
            </div>
        </footer>
    }
}
