//! Admin panel
//!
//! Server-rendered editors for blog posts, authors, tags, events and team
//! members. Every write re-renders the section with a toast describing the
//! outcome; failures keep the submitted values in the editor.

pub mod blog;
pub mod events;
pub mod team;

use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};

use super::middleware::{self, AppState};
use crate::services::ServiceError;
use crate::ui::Toast;

/// Admin routes, gated by `require_session`
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(|| async { Redirect::to("/admin/blog") }))
        // Blog
        .route("/admin/blog", get(blog::index))
        .route("/admin/blog/posts", post(blog::save_post))
        .route("/admin/blog/posts/{id}/edit", get(blog::edit_post))
        .route("/admin/blog/posts/{id}/delete", post(blog::delete_post))
        .route("/admin/blog/authors", post(blog::create_author))
        .route("/admin/blog/tags", post(blog::create_tag))
        // Events
        .route("/admin/events", get(events::index).post(events::save))
        .route("/admin/events/new", get(events::new_event))
        .route("/admin/events/{id}/edit", get(events::edit))
        .route("/admin/events/{id}/delete", post(events::delete))
        // Team
        .route("/admin/team", get(team::index).post(team::save))
        .route("/admin/team/new", get(team::new_member))
        .route("/admin/team/{id}/edit", get(team::edit))
        .route("/admin/team/{id}/delete", post(team::delete))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_session,
        ))
}

/// Destructive toast and response status for a failed admin action.
///
/// Store failures are logged here, before they reach the page.
pub(crate) fn failure(action: &str, err: &ServiceError) -> (Toast, StatusCode) {
    let status = match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Store(e) => {
            tracing::error!("Failed to {}: {}", action, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (Toast::from_error(action, err), status)
}

/// Values of a repeated form field, in submission order
pub(crate) fn form_values(pairs: &[(String, String)], key: &str) -> Vec<String> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .collect()
}

/// Last value of a form field, or an empty string
pub(crate) fn form_value(pairs: &[(String, String)], key: &str) -> String {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .unwrap_or_default()
}
