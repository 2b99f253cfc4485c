use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;
use log::info;
use web_sys::MouseEvent;

mod bus;
mod config;
mod context;
mod theme;
mod consent {
    pub mod hooks;
    pub mod storage;
    pub mod store;
}
mod lazy {
    pub mod loader;
    pub mod mount;
    pub mod prefetch;
    pub mod viewport;
    #[cfg(test)]
    pub mod testing;
}
mod content {
    pub mod posts;
    pub mod sections;
}
mod components {
    pub mod animate;
    pub mod cookie_banner;
    pub mod footer;
    pub mod hero;
    pub mod info_card;
    pub mod lazy_section;
    pub mod prefetch_link;
    pub mod section_boundary;
    pub mod spinner;
}
mod pages {
    pub mod blog;
    pub mod blog_post;
    pub mod home;
    pub mod not_found;
    pub mod privacy;
}

use components::{cookie_banner::CookieBanner, footer::Footer, prefetch_link::PrefetchLink};
use consent::storage::open_default;
use context::SiteContext;
use pages::{
    blog::Blog,
    blog_post::BlogPostPage,
    home::Home,
    not_found::NotFound,
    privacy::PrivacyPolicy,
};
use theme::{Theme, ThemeContext, ThemeProvider};

#[derive(Clone, Debug, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/blog")]
    Blog,
    #[at("/blog/:slug")]
    BlogPost { slug: String },
    #[at("/privacy")]
    Privacy,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Blog => {
            info!("Rendering Blog page");
            html! { <Blog /> }
        },
        Route::BlogPost { slug } => {
            info!("Rendering blog post {}", slug);
            html! { <BlogPostPage slug={slug} /> }
        },
        Route::Privacy => {
            info!("Rendering Privacy page");
            html! { <PrivacyPolicy /> }
        },
        Route::NotFound => {
            info!("Rendering 404 page");
            html! { <NotFound /> }
        },
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let (_, scroll_y) = use_window_scroll();
    let is_scrolled = scroll_y > 80.0;
    let theme = use_context::<ThemeContext>().expect("ThemeContext not provided");

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let toggle_theme = {
        let toggle = theme.toggle.clone();
        Callback::from(move |_: MouseEvent| toggle.emit(()))
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", is_scrolled.then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"ledgerline"}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu} aria-label="Menu">
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <div onclick={close_menu.clone()}>
                        <PrefetchLink to={Route::Home} prefetch="features" classes="nav-link">
                            {"Product"}
                        </PrefetchLink>
                    </div>
                    <div onclick={close_menu.clone()}>
                        <PrefetchLink to={Route::Blog} prefetch="cta" classes="nav-link">
                            {"Blog"}
                        </PrefetchLink>
                    </div>
                    <div onclick={close_menu}>
                        <Link<Route> to={Route::Privacy} classes="nav-link">
                            {"Privacy"}
                        </Link<Route>>
                    </div>
                    <button class="theme-toggle" onclick={toggle_theme}>
                        { if theme.theme == Theme::Dark { "Light mode" } else { "Dark mode" } }
                    </button>
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    let site = use_memo(|_| SiteContext::from_config(open_default()), ());

    html! {
        <ContextProvider<SiteContext> context={(*site).clone()}>
            <ThemeProvider storage={site.storage.clone()}>
                <BrowserRouter>
                    <Nav />
                    <main>
                        <Switch<Route> render={switch} />
                    </main>
                    <Footer />
                    <CookieBanner />
                </BrowserRouter>
                <style>{SITE_CSS}</style>
            </ThemeProvider>
        </ContextProvider<SiteContext>>
    }
}

const SITE_CSS: &str = r#"
    * { box-sizing: border-box; }
    body {
        margin: 0;
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
    }
    .top-nav {
        position: fixed;
        top: 0;
        width: 100%;
        z-index: 100;
        transition: background 0.3s ease;
    }
    .top-nav.scrolled {
        background: var(--surface);
        border-bottom: 1px solid var(--border);
    }
    .nav-content {
        max-width: 1200px;
        margin: 0 auto;
        padding: 1rem 2rem;
        display: flex;
        align-items: center;
        justify-content: space-between;
    }
    .nav-logo {
        font-size: 1.5rem;
        font-weight: 700;
        color: var(--text);
        text-decoration: none;
    }
    .nav-right {
        display: flex;
        gap: 1.5rem;
        align-items: center;
    }
    .nav-link {
        color: var(--muted);
        text-decoration: none;
    }
    .nav-link:hover { color: var(--accent); }
    .burger-menu { display: none; background: none; border: none; }
    .burger-menu span {
        display: block;
        width: 24px;
        height: 2px;
        margin: 5px 0;
        background: var(--text);
    }
    .theme-toggle, .cookie-secondary {
        background: transparent;
        color: var(--text);
        border: 1px solid var(--border);
        border-radius: 8px;
        padding: 0.5rem 1rem;
        cursor: pointer;
    }
    .cookie-primary, .hero-cta, .cta-button {
        background: var(--accent);
        color: #fff;
        border: none;
        border-radius: 8px;
        padding: 0.75rem 1.5rem;
        cursor: pointer;
        text-decoration: none;
        display: inline-block;
    }
    .hero {
        position: relative;
        min-height: 90vh;
        display: flex;
        align-items: center;
        justify-content: center;
        text-align: center;
        overflow: hidden;
    }
    .hero-background {
        position: absolute;
        inset: 0;
        background: radial-gradient(circle at 30% 20%, var(--border), transparent 60%);
        z-index: -2;
    }
    .hero-overlay {
        position: absolute;
        inset: 0;
        background: #000;
        pointer-events: none;
        z-index: -1;
    }
    .hero-title { font-size: 3.5rem; margin-bottom: 1rem; }
    .hero-subtitle { color: var(--muted); font-size: 1.25rem; max-width: 640px; margin: 0 auto 2rem; }
    .rotating-text { color: var(--accent); animation: rise 0.5s ease-out; display: inline-block; }
    @keyframes rise {
        from { transform: translateY(40%); opacity: 0; }
        to { transform: translateY(0); opacity: 1; }
    }
    .fade-in { opacity: 0; transform: translateY(24px); transition: opacity 0.6s ease, transform 0.6s ease; }
    .fade-in.is-visible { opacity: 1; transform: none; }
    .home-intro { text-align: center; color: var(--muted); padding: 2rem; }
    .home-section { max-width: 1100px; margin: 0 auto; padding: 5rem 2rem; text-align: center; }
    .home-section h2 { font-size: 2.4rem; margin-bottom: 0.75rem; }
    .section-lead { color: var(--muted); margin-bottom: 2.5rem; }
    .card-grid {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
        gap: 1.5rem;
    }
    .info-card {
        background: var(--surface);
        border: 1px solid var(--border);
        border-radius: 12px;
        padding: 1.75rem;
        text-align: left;
        color: inherit;
        text-decoration: none;
        transition: transform 0.3s ease;
    }
    .info-card-link:hover { transform: translateY(-4px); }
    .info-card-icon { color: var(--accent); font-size: 1.5rem; }
    .info-card-body { color: var(--muted); }
    .lazy-placeholder { width: 100%; }
    .spinner-wrap { display: flex; align-items: center; justify-content: center; padding: 3rem; }
    .spinner-full { min-height: 100vh; }
    .spinner {
        width: 42px;
        height: 42px;
        border: 3px solid var(--border);
        border-top-color: var(--accent);
        border-radius: 50%;
        animation: spin 0.8s linear infinite;
    }
    @keyframes spin { to { transform: rotate(360deg); } }
    .visually-hidden { position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0 0 0 0); }
    .section-error { text-align: center; color: var(--muted); padding: 4rem 2rem; }
    .cookie-banner {
        position: fixed;
        left: 1rem;
        right: 1rem;
        bottom: 1rem;
        max-width: 560px;
        background: var(--surface);
        border: 1px solid var(--border);
        border-radius: 12px;
        padding: 1.5rem;
        z-index: 200;
        transform: translateY(150%);
        transition: transform 0.4s ease;
    }
    .cookie-banner.is-open { transform: none; }
    .cookie-actions, .legal-actions { display: flex; gap: 0.75rem; flex-wrap: wrap; justify-content: flex-end; }
    .cookie-toggles { display: grid; gap: 0.75rem; margin-bottom: 1rem; }
    .cookie-toggle { display: grid; grid-template-columns: auto 1fr; gap: 0.25rem 0.75rem; }
    .cookie-toggle-desc { grid-column: 2; color: var(--muted); font-size: 0.9rem; }
    .legal-page, .not-found-page { max-width: 760px; margin: 0 auto; padding: 110px 2rem 4rem; }
    .cookie-table { width: 100%; border-collapse: collapse; margin: 1rem 0; }
    .cookie-table th, .cookie-table td { border-bottom: 1px solid var(--border); padding: 0.75rem; text-align: left; }
    .site-footer { border-top: 1px solid var(--border); padding: 3rem 2rem; color: var(--muted); }
    .footer-content { max-width: 1100px; margin: 0 auto; }
    .footer-links { display: flex; gap: 1.5rem; margin: 1rem 0; }
    .footer-links a { color: var(--muted); }
    @media (max-width: 768px) {
        .burger-menu { display: block; }
        .nav-right { display: none; }
        .nav-right.mobile-menu-open {
            display: flex;
            flex-direction: column;
            position: absolute;
            top: 100%;
            left: 0;
            right: 0;
            background: var(--surface);
            padding: 1rem 2rem;
        }
        .hero-title { font-size: 2.4rem; }
    }
"#;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::SiteEvent;
    use crate::consent::storage::MemoryStorage;
    use crate::consent::store::SettingsPatch;
    use crate::lazy::loader::RegistryLoader;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn routes_resolve_from_paths() {
        assert_eq!(Route::recognize("/"), Some(Route::Home));
        assert_eq!(Route::recognize("/blog"), Some(Route::Blog));
        assert_eq!(
            Route::recognize("/blog/reading-your-cash-flow"),
            Some(Route::BlogPost {
                slug: "reading-your-cash-flow".to_string()
            })
        );
    }

    #[test]
    fn context_wires_the_store_to_the_shared_bus() {
        let site = SiteContext::new(Rc::new(RegistryLoader), Rc::new(MemoryStorage::new()));
        let notified = Rc::new(Cell::new(0));
        let _sub = {
            let notified = notified.clone();
            site.bus.subscribe(move |event| {
                if matches!(event, SiteEvent::ConsentChanged(_)) {
                    notified.set(notified.get() + 1);
                }
            })
        };

        site.clone().consent.update_settings(SettingsPatch::new().analytics(true));
        assert_eq!(notified.get(), 1);
        assert!(site == site.clone());
    }
}
