//! Public blog pages

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tera::Context as TeraContext;

use super::middleware::{AppState, CurrentUser, WebError};
use super::responses::{PostCard, PostPage, TagChip};
use crate::services::blog::{filter_posts, toggle_tag};
use crate::services::MarkdownRenderer;

#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    /// Selected tag id
    pub tag: Option<String>,
    /// Search text matched against title and preview
    pub q: Option<String>,
}

/// GET /resources/blog
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
    user: CurrentUser,
) -> Result<Html<String>, WebError> {
    let (posts, tags) = state.blog_service.list_posts_and_tags().await?;

    let selected = query.tag.as_deref().filter(|t| !t.is_empty());
    let search = query.q.as_deref().unwrap_or("").trim();
    let placeholder = &state.config.site.placeholder_image;

    let cards: Vec<PostCard> = filter_posts(&posts, selected, search)
        .into_iter()
        .map(|post| PostCard::new(post, placeholder))
        .collect();

    let chips: Vec<TagChip> = tags
        .iter()
        .map(|tag| TagChip {
            id: tag.id.clone(),
            name: tag.name.clone(),
            selected: selected == Some(tag.id.as_str()),
            toggle: toggle_tag(selected, &tag.id).unwrap_or_default(),
        })
        .collect();

    let mut ctx = TeraContext::new();
    ctx.insert("posts", &cards);
    ctx.insert("tags", &chips);
    ctx.insert("selected_tag", &selected);
    ctx.insert("search", search);
    state.render(
        "blog_list.html",
        &ctx,
        &state.page_vars("/resources/blog", user.0, None),
    )
}

/// GET /resources/blog/{id}
pub async fn post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let vars = state.page_vars("/resources/blog", user.0, None);
    let mut ctx = TeraContext::new();

    match state.blog_service.get_post(&id).await? {
        Some(view) => {
            let page = PostPage::new(
                &view,
                &state.config.site.placeholder_image,
                &MarkdownRenderer::new(),
            );
            ctx.insert("post", &page);
            Ok(state.render("blog_post.html", &ctx, &vars)?.into_response())
        }
        None => {
            tracing::debug!(post_id = %id, "Blog post not found");
            let html = state.render("blog_post.html", &ctx, &vars)?;
            Ok((StatusCode::NOT_FOUND, html).into_response())
        }
    }
}
