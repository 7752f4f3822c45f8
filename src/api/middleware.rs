//! API middleware
//!
//! Contains:
//! - Shared application state
//! - HTML error responses
//! - Session lookup for the current visitor
//! - The admin session gate

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use std::convert::Infallible;
use std::sync::Arc;
use tera::Context as TeraContext;

use crate::auth::{extract_session_token, DynAuth};
use crate::config::Config;
use crate::models::AuthUser;
use crate::services::{BlogService, ContactService, EventService, ServiceError, TeamService};
use crate::theme::{simple_error_page, StandardTemplateVars, ThemeEngine};
use crate::ui::Toast;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub blog_service: Arc<BlogService>,
    pub event_service: Arc<EventService>,
    pub team_service: Arc<TeamService>,
    pub contact_service: Arc<ContactService>,
    pub auth: DynAuth,
    pub theme_engine: Arc<ThemeEngine>,
}

impl AppState {
    /// Standard template variables for a page at `path`
    pub fn page_vars(
        &self,
        path: &str,
        user: Option<AuthUser>,
        toast: Option<Toast>,
    ) -> StandardTemplateVars {
        StandardTemplateVars::new(&self.config.site.name, path, &self.config.site.placeholder_image)
            .with_user(user)
            .with_toast(toast)
    }

    /// Render a page template into an HTML response
    pub fn render(
        &self,
        template: &str,
        context: &TeraContext,
        vars: &StandardTemplateVars,
    ) -> Result<Html<String>, WebError> {
        self.theme_engine
            .render_with_standard_vars(template, context, vars)
            .map(Html)
            .map_err(|e| {
                tracing::error!("Failed to render '{}': {}", template, e);
                WebError::internal("The page could not be rendered")
            })
    }
}

/// Error page for a failed request
#[derive(Debug, Clone, thiserror::Error)]
#[error("{title}: {message}")]
pub struct WebError {
    pub status: StatusCode,
    pub title: &'static str,
    pub message: String,
}

impl WebError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            title: "Page not found",
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            title: "Bad request",
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            title: "Sign in required",
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            title: "Something went wrong",
            message: message.into(),
        }
    }
}

impl From<ServiceError> for WebError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(v) => WebError::bad_request(v.message),
            ServiceError::NotFound(what) => WebError::not_found(format!("{what} not found")),
            ServiceError::Store(e) => {
                tracing::error!("Store request failed: {}", e);
                WebError::internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for WebError {
    /// The body is a plain page; `render_error_pages` swaps in the themed
    /// one when the router has state available.
    fn into_response(self) -> Response {
        let body = simple_error_page(self.title, &self.message);
        let mut response = (self.status, Html(body)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Re-render `WebError` responses through `error.html`
pub async fn render_error_pages(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;

    let Some(error) = response.extensions_mut().remove::<WebError>() else {
        return response;
    };

    let mut context = TeraContext::new();
    context.insert("status", &error.status.as_u16());
    context.insert("error_title", error.title);
    context.insert("error_message", &error.message);
    let vars = state.page_vars(&path, None, None);

    match state
        .theme_engine
        .render_with_standard_vars("error.html", &context, &vars)
    {
        Ok(html) => (error.status, Html(html)).into_response(),
        Err(e) => {
            tracing::warn!("Failed to render error template: {}", e);
            error.into_response()
        }
    }
}

/// Visitor behind the request's session token, if any
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<AuthUser>);

impl CurrentUser {
    pub fn user(&self) -> Option<&AuthUser> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let Some(token) = extract_session_token(&parts.headers) else {
            return Ok(CurrentUser(None));
        };

        match state.auth.current_user(&token).await {
            Ok(user) => Ok(CurrentUser(user)),
            Err(e) => {
                // Auth outages read as signed out rather than failing the page
                tracing::warn!("Session lookup failed: {}", e);
                Ok(CurrentUser(None))
            }
        }
    }
}

/// Admin gate: requires a valid session when `admin.require_auth` is on
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    if !state.config.admin.require_auth {
        return Ok(next.run(request).await);
    }

    let token = extract_session_token(request.headers())
        .ok_or_else(|| WebError::unauthorized("Please log in to access the admin panel"))?;

    let user = state
        .auth
        .current_user(&token)
        .await
        .map_err(|e| {
            tracing::error!("Session validation failed: {}", e);
            WebError::internal(format!("Session validation failed: {}", e))
        })?
        .ok_or_else(|| WebError::unauthorized("Invalid or expired session"))?;

    tracing::debug!(user_id = %user.id, "Admin session accepted");
    request.extensions_mut().insert(CurrentUser(Some(user)));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_service_error_status() {
        let err: WebError = ServiceError::NotFound("Post".into()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Post not found");

        let err: WebError = ServiceError::Store(StoreError::Request("timeout".into())).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_keeps_status() {
        let response = WebError::unauthorized("nope").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.extensions().get::<WebError>().is_some());
    }
}
