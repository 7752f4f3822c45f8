//! Contact page
//!
//! The form re-renders with the entered values and field errors when
//! validation fails. A successful submission shows the thank-you message
//! and refreshes back to a blank form once the success timeout runs out.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use chrono::Utc;
use serde::Serialize;
use tera::Context as TeraContext;

use super::middleware::{AppState, CurrentUser, WebError};
use super::responses::SelectOption;
use crate::content;
use crate::services::contact::{
    GRADE_LEVELS, LOCATIONS, REFERRAL_SOURCES, SUCCESS_MESSAGE, SUCCESS_TITLE,
};
use crate::services::{ContactForm, FieldErrors};

#[derive(Debug, Serialize)]
struct FormOptions {
    locations: Vec<SelectOption>,
    grades: Vec<SelectOption>,
    sources: Vec<SelectOption>,
}

impl FormOptions {
    fn for_form(form: &ContactForm) -> Self {
        Self {
            locations: LOCATIONS
                .iter()
                .map(|l| SelectOption::new(*l, *l, &form.location))
                .collect(),
            grades: GRADE_LEVELS
                .iter()
                .map(|g| SelectOption::new(*g, *g, &form.grade))
                .collect(),
            sources: REFERRAL_SOURCES
                .iter()
                .map(|(value, label)| SelectOption::new(*value, *label, &form.source))
                .collect(),
        }
    }
}

fn contact_context(form: &ContactForm, errors: &FieldErrors) -> TeraContext {
    let mut ctx = TeraContext::new();
    ctx.insert("form", form);
    ctx.insert("errors", errors);
    ctx.insert("options", &FormOptions::for_form(form));
    ctx.insert("offices", &content::OFFICES);
    ctx
}

/// GET /contact
pub async fn show(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, WebError> {
    let ctx = contact_context(&ContactForm::default(), &FieldErrors::default());
    state.render("contact.html", &ctx, &state.page_vars("/contact", user.0, None))
}

/// POST /contact
pub async fn submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<ContactForm>,
) -> Result<Response, WebError> {
    let vars = state.page_vars("/contact", user.0, None);

    match state.contact_service.submit(&form).await {
        Ok(status) => {
            let mut ctx = contact_context(&ContactForm::default(), &FieldErrors::default());
            ctx.insert("success", &status.status_at(Utc::now()).is_success());
            ctx.insert("success_title", SUCCESS_TITLE);
            ctx.insert("success_message", SUCCESS_MESSAGE);
            ctx.insert(
                "refresh_seconds",
                &state.contact_service.success_timeout().as_secs().max(1),
            );
            Ok(state.render("contact.html", &ctx, &vars)?.into_response())
        }
        Err(errors) => {
            let ctx = contact_context(&form, &errors);
            let html = state.render("contact.html", &ctx, &vars)?;
            Ok((StatusCode::BAD_REQUEST, html).into_response())
        }
    }
}
