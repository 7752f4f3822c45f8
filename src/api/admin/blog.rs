//! Blog admin: posts, authors and tags

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::Serialize;
use tera::Context as TeraContext;

use super::{failure, form_value, form_values};
use crate::api::middleware::{AppState, CurrentUser, WebError};
use crate::api::responses::{AuthorView, PostCard, SelectOption};
use crate::services::{AuthorDraft, PostDraft, SaveOutcome, TagDraft};
use crate::ui::Toast;

#[derive(Debug, Serialize)]
struct TagOption {
    id: String,
    name: String,
    checked: bool,
}

/// Extra editor state kept across a failed submission
#[derive(Debug, Default)]
struct Drafts {
    post: PostDraft,
    author: AuthorDraft,
    tag: TagDraft,
}

async fn render_admin(
    state: &AppState,
    user: CurrentUser,
    drafts: Drafts,
    toast: Option<Toast>,
    status: StatusCode,
) -> Result<Response, WebError> {
    let (posts, authors, tags) = tokio::try_join!(
        state.blog_service.list_posts(),
        state.blog_service.list_authors(),
        state.blog_service.list_tags(),
    )?;

    let placeholder = &state.config.site.placeholder_image;
    let post_rows: Vec<PostCard> = posts.iter().map(|p| PostCard::new(p, placeholder)).collect();
    let author_rows: Vec<AuthorView> =
        authors.iter().map(|a| AuthorView::new(a, placeholder)).collect();
    let author_options: Vec<SelectOption> = authors
        .iter()
        .map(|a| SelectOption::new(a.id.clone(), a.name.clone(), &drafts.post.author_id))
        .collect();
    let tag_options: Vec<TagOption> = tags
        .iter()
        .map(|t| TagOption {
            id: t.id.clone(),
            name: t.name.clone(),
            checked: drafts.post.tag_ids.contains(&t.id),
        })
        .collect();

    let mut ctx = TeraContext::new();
    ctx.insert("posts", &post_rows);
    ctx.insert("authors", &author_rows);
    ctx.insert("tags", &tags);
    ctx.insert("author_options", &author_options);
    ctx.insert("tag_options", &tag_options);
    ctx.insert("is_new", &drafts.post.is_new());
    ctx.insert("draft", &drafts.post);
    ctx.insert("author_draft", &drafts.author);
    ctx.insert("tag_draft", &drafts.tag);

    let vars = state.page_vars("/admin/blog", user.0, toast);
    let html = state.render("admin_blog.html", &ctx, &vars)?;
    Ok((status, html).into_response())
}

/// Post draft from the editor form; `tag_ids` repeats once per checked tag
fn post_draft(pairs: &[(String, String)]) -> PostDraft {
    PostDraft {
        id: form_value(pairs, "id"),
        title: form_value(pairs, "title"),
        preview: form_value(pairs, "preview"),
        content: form_value(pairs, "content"),
        image_url: form_value(pairs, "image_url"),
        author_id: form_value(pairs, "author_id"),
        tag_ids: form_values(pairs, "tag_ids"),
    }
}

/// GET /admin/blog
pub async fn index(State(state): State<AppState>, user: CurrentUser) -> Result<Response, WebError> {
    render_admin(&state, user, Drafts::default(), None, StatusCode::OK).await
}

/// GET /admin/blog/posts/{id}/edit
pub async fn edit_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let view = state
        .blog_service
        .get_post(&id)
        .await?
        .ok_or_else(|| WebError::not_found("Post not found"))?;

    let drafts = Drafts {
        post: PostDraft::from_view(&view),
        ..Default::default()
    };
    render_admin(&state, user, drafts, None, StatusCode::OK).await
}

/// POST /admin/blog/posts
pub async fn save_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, WebError> {
    let draft = post_draft(&pairs);

    match state.blog_service.save_post(&draft).await {
        Ok(outcome) => {
            let toast = Toast::saved("Post", outcome, draft.title.trim());
            render_admin(&state, user, Drafts::default(), Some(toast), StatusCode::OK).await
        }
        Err(err) => {
            let (toast, status) = failure("save post", &err);
            let drafts = Drafts {
                post: draft,
                ..Default::default()
            };
            render_admin(&state, user, drafts, Some(toast), status).await
        }
    }
}

/// POST /admin/blog/posts/{id}/delete
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let (toast, status) = match state.blog_service.delete_post(&id).await {
        Ok(()) => (Toast::deleted("Post"), StatusCode::OK),
        Err(err) => failure("delete post", &err),
    };
    render_admin(&state, user, Drafts::default(), Some(toast), status).await
}

/// POST /admin/blog/authors
pub async fn create_author(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(draft): Form<AuthorDraft>,
) -> Result<Response, WebError> {
    match state.blog_service.create_author(&draft).await {
        Ok(author) => {
            let toast = Toast::saved("Author", SaveOutcome::Created, &author.name);
            render_admin(&state, user, Drafts::default(), Some(toast), StatusCode::OK).await
        }
        Err(err) => {
            let (toast, status) = failure("create author", &err);
            let drafts = Drafts {
                author: draft,
                ..Default::default()
            };
            render_admin(&state, user, drafts, Some(toast), status).await
        }
    }
}

/// POST /admin/blog/tags
pub async fn create_tag(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(draft): Form<TagDraft>,
) -> Result<Response, WebError> {
    match state.blog_service.create_tag(&draft).await {
        Ok(tag) => {
            let toast = Toast::saved("Tag", SaveOutcome::Created, &tag.name);
            render_admin(&state, user, Drafts::default(), Some(toast), StatusCode::OK).await
        }
        Err(err) => {
            let (toast, status) = failure("create tag", &err);
            let drafts = Drafts {
                tag: draft,
                ..Default::default()
            };
            render_admin(&state, user, drafts, Some(toast), status).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_draft_collects_repeated_tags() {
        let pairs = vec![
            ("id".to_string(), String::new()),
            ("title".to_string(), "Essay Tips".to_string()),
            ("tag_ids".to_string(), "tag-essays".to_string()),
            ("tag_ids".to_string(), "tag-admissions".to_string()),
        ];
        let draft = post_draft(&pairs);
        assert!(draft.is_new());
        assert_eq!(draft.title, "Essay Tips");
        assert_eq!(draft.tag_ids, vec!["tag-essays", "tag-admissions"]);
    }
}
