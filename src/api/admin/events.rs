//! Events admin

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use chrono::Utc;
use tera::Context as TeraContext;

use super::failure;
use crate::api::middleware::{AppState, CurrentUser, WebError};
use crate::api::responses::{EventCard, SelectOption};
use crate::models::EventType;
use crate::services::EventDraft;
use crate::ui::Toast;

async fn render_list(
    state: &AppState,
    user: CurrentUser,
    toast: Option<Toast>,
    status: StatusCode,
) -> Result<Response, WebError> {
    let events = state.event_service.list_events().await?;
    let rows: Vec<EventCard> = events.iter().map(EventCard::from).collect();

    let mut ctx = TeraContext::new();
    ctx.insert("events", &rows);
    let vars = state.page_vars("/admin/events", user.0, toast);
    let html = state.render("admin_events.html", &ctx, &vars)?;
    Ok((status, html).into_response())
}

fn render_form(
    state: &AppState,
    user: CurrentUser,
    draft: &EventDraft,
    toast: Option<Toast>,
    status: StatusCode,
) -> Result<Response, WebError> {
    let types: Vec<SelectOption> = EventType::ALL
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.option_label(), &draft.event_type))
        .collect();

    let mut ctx = TeraContext::new();
    ctx.insert("draft", draft);
    ctx.insert("is_new", &draft.is_new());
    ctx.insert("types", &types);
    let vars = state.page_vars("/admin/events", user.0, toast);
    let html = state.render("admin_event_form.html", &ctx, &vars)?;
    Ok((status, html).into_response())
}

/// GET /admin/events - Events by date with registration counts
pub async fn index(State(state): State<AppState>, user: CurrentUser) -> Result<Response, WebError> {
    render_list(&state, user, None, StatusCode::OK).await
}

/// GET /admin/events/new
pub async fn new_event(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let draft = EventDraft::new(Utc::now().date_naive());
    render_form(&state, user, &draft, None, StatusCode::OK)
}

/// GET /admin/events/{id}/edit
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let event = state
        .event_service
        .get_event(&id)
        .await?
        .ok_or_else(|| WebError::not_found("Event not found"))?;
    render_form(&state, user, &EventDraft::from_event(&event), None, StatusCode::OK)
}

/// POST /admin/events - Insert or update depending on the draft id
pub async fn save(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(draft): Form<EventDraft>,
) -> Result<Response, WebError> {
    match state.event_service.save_event(&draft).await {
        Ok(outcome) => {
            let toast = Toast::saved("Event", outcome, draft.title.trim());
            render_list(&state, user, Some(toast), StatusCode::OK).await
        }
        Err(err) => {
            let (toast, status) = failure("save event", &err);
            render_form(&state, user, &draft, Some(toast), status)
        }
    }
}

/// POST /admin/events/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let (toast, status) = match state.event_service.delete_event(&id).await {
        Ok(()) => (Toast::deleted("Event"), StatusCode::OK),
        Err(err) => failure("delete event", &err),
    };
    render_list(&state, user, Some(toast), status).await
}
