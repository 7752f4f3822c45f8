//! Public events page and registration

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tera::Context as TeraContext;

use super::middleware::{AppState, CurrentUser, WebError};
use super::responses::{CalendarView, EventCard};
use crate::services::event::upcoming_events;
use crate::services::RegistrationError;
use crate::ui::calendar::parse_month;
use crate::ui::{CalendarMonth, Toast};

pub const NO_UPCOMING_MESSAGE: &str = "No upcoming events scheduled. Check back soon!";

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    /// Displayed month, `YYYY-MM`
    pub month: Option<String>,
    /// Selected date, `YYYY-MM-DD`
    pub date: Option<String>,
}

impl EventsQuery {
    fn selected(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
    }

    /// Month from `?month`, else the selected date's month, else today's
    fn reference(&self, today: NaiveDate) -> NaiveDate {
        self.month
            .as_deref()
            .and_then(parse_month)
            .or_else(|| self.selected())
            .unwrap_or(today)
    }
}

async fn render_events(
    state: &AppState,
    query: &EventsQuery,
    user: CurrentUser,
    toast: Option<Toast>,
    status: StatusCode,
) -> Result<Response, WebError> {
    let events = state.event_service.list_events().await?;
    let today = Utc::now().date_naive();

    let upcoming: Vec<EventCard> = upcoming_events(&events, today)
        .iter()
        .map(EventCard::from)
        .collect();
    let calendar = CalendarMonth::build(query.reference(today), today, query.selected(), &events);

    let mut ctx = TeraContext::new();
    ctx.insert("upcoming", &upcoming);
    ctx.insert("no_upcoming_message", NO_UPCOMING_MESSAGE);
    ctx.insert("calendar", &CalendarView::new(&calendar, &events));
    ctx.insert("signed_in", &user.0.is_some());

    let vars = state.page_vars("/resources/events", user.0, toast);
    let html = state.render("events.html", &ctx, &vars)?;
    Ok((status, html).into_response())
}

/// GET /resources/events
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
    user: CurrentUser,
) -> Result<Response, WebError> {
    render_events(&state, &query, user, None, StatusCode::OK).await
}

/// POST /resources/events/{id}/register
pub async fn register(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<EventsQuery>,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let (toast, status) = match state.event_service.register(&id, user.user()).await {
        Ok(outcome) => (Toast::success("Registration", outcome.message()), StatusCode::OK),
        Err(err) => {
            let status = match &err {
                RegistrationError::LoginRequired => StatusCode::UNAUTHORIZED,
                RegistrationError::EventFull => StatusCode::CONFLICT,
                RegistrationError::NotFound => StatusCode::NOT_FOUND,
                RegistrationError::Store(e) => {
                    tracing::error!(event_id = %id, "Registration failed: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (Toast::error(err.to_string()), status)
        }
    };

    render_events(&state, &query, user, Some(toast), status).await
}
