use yew::prelude::*;
use yew_router::components::Link;

use crate::content::posts::find_post;
use crate::pages::not_found::NotFound;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct BlogPostProps {
    pub slug: String,
}

#[function_component(BlogPostPage)]
pub fn blog_post_page(props: &BlogPostProps) -> Html {
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            props.slug.clone(),
        );
    }

    let Some(post) = find_post(&props.slug) else {
        return html! { <NotFound /> };
    };

    html! {
        <article class="blog-post-page">
            <Link<Route> to={Route::Blog} classes="blog-back">{"← All posts"}</Link<Route>>
            <header class="blog-post-header">
                <h1>{post.title}</h1>
                <p class="blog-post-meta">
                    {format!("{} · {} · {} min read", post.author, post.display_date(), post.read_minutes)}
                </p>
                <ul class="blog-tags">
                    { for post.tags.iter().map(|tag| html! { <li key={*tag}>{*tag}</li> }) }
                </ul>
            </header>
            <img src={post.image} alt={post.title} class="blog-post-image" />
            <div class="blog-post-body">
                { for post.body.iter().map(|paragraph| html! { <p>{*paragraph}</p> }) }
            </div>
            <style>
                {r#"
                .blog-post-page {
                    max-width: 760px;
                    margin: 0 auto;
                    padding: 110px 2rem 4rem;
                }
                .blog-back {
                    color: var(--accent);
                    text-decoration: none;
                }
                .blog-post-header h1 {
                    font-size: 2.8rem;
                    margin: 1.5rem 0 0.5rem;
                }
                .blog-post-meta {
                    color: var(--muted);
                }
                .blog-tags {
                    list-style: none;
                    display: flex;
                    gap: 0.5rem;
                    padding: 0;
                }
                .blog-tags li {
                    border: 1px solid var(--border);
                    border-radius: 999px;
                    padding: 0.2rem 0.8rem;
                    font-size: 0.85rem;
                }
                .blog-post-image {
                    width: 100%;
                    border-radius: 12px;
                    margin: 1.5rem 0;
                }
                .blog-post-body p {
                    line-height: 1.75;
                    font-size: 1.1rem;
                    margin-bottom: 1.25rem;
                }
                "#}
            </style>
        </article>
    }
}
