use yew::prelude::*;
use yew_router::components::Link;

use crate::components::animate::FadeIn;
use crate::components::lazy_section::LazySection;
use crate::components::section_boundary::SectionBoundary;
use crate::content::posts::sorted_posts;
use crate::Route;

#[function_component(Blog)]
pub fn blog() -> Html {
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

    html! {
        <div class="blog-list-page">
            <section class="blog-list-hero">
                <h1>{"Blog"}</h1>
                <p>{"Guides, product notes and the occasional opinion on running a business's money"}</p>
            </section>
            <section class="blog-list-section">
                { for sorted_posts().into_iter().enumerate().map(|(i, post)| html! {
                    <FadeIn key={post.slug} delay_ms={(i as u32) * 80}>
                        <div class="blog-post-preview">
                            <Link<Route> to={Route::BlogPost { slug: post.slug.to_string() }}>
                                <img src={post.image} alt={post.title} loading="lazy" class="blog-preview-image" />
                                <h2>{post.title}</h2>
                                <p>{post.summary}</p>
                                <span class="blog-date">
                                    {format!("{} · {} min read", post.display_date(), post.read_minutes)}
                                </span>
                            </Link<Route>>
                        </div>
                    </FadeIn>
                }) }
            </section>
            <SectionBoundary>
                <LazySection name="cta" />
            </SectionBoundary>
            <style>
                {r#"
                .blog-list-page {
                    padding-top: 74px;
                    min-height: 100vh;
                }
                .blog-list-hero {
                    text-align: center;
                    padding: 6rem 2rem 3rem;
                }
                .blog-list-hero h1 {
                    font-size: 3.5rem;
                    margin-bottom: 1.5rem;
                }
                .blog-list-hero p {
                    font-size: 1.2rem;
                    color: var(--muted);
                    max-width: 600px;
                    margin: 0 auto;
                }
                .blog-list-section {
                    max-width: 800px;
                    margin: 0 auto;
                    padding: 2rem;
                }
                .blog-post-preview {
                    background: var(--surface);
                    border: 1px solid var(--border);
                    border-radius: 12px;
                    margin-bottom: 2rem;
                    overflow: hidden;
                    transition: all 0.3s ease;
                }
                .blog-post-preview:hover {
                    transform: translateY(-5px);
                }
                .blog-post-preview a {
                    text-decoration: none;
                    color: inherit;
                    display: block;
                }
                .blog-preview-image {
                    width: 100%;
                    height: auto;
                    display: block;
                }
                .blog-post-preview h2 {
                    font-size: 1.8rem;
                    padding: 1.5rem 1.5rem 0;
                }
                .blog-post-preview p {
                    color: var(--muted);
                    padding: 0 1.5rem;
                    margin: 1rem 0;
                }
                .blog-date {
                    display: block;
                    padding: 0 1.5rem 1.5rem;
                    color: var(--muted);
                    font-size: 0.9rem;
                }
                @media (max-width: 768px) {
                    .blog-list-hero h1 {
                        font-size: 2.5rem;
                    }
                    .blog-list-section {
                        padding: 1rem;
                    }
                }
                "#}
            </style>
        </div>
    }
}
