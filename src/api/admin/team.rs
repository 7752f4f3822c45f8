//! Team admin
//!
//! The member form carries its degree list as repeated `degrees` fields.
//! Its buttons post an `action`: `add_degree` appends `new_degree`,
//! `remove_degree:<index>` drops one entry, and `save` stores the member.
//! Degree edits re-render the form without touching the store, and so does
//! a remove whose index does not parse.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use tera::Context as TeraContext;

use super::{failure, form_value, form_values};
use crate::api::middleware::{AppState, CurrentUser, WebError};
use crate::api::responses::{MemberCard, SelectOption};
use crate::models::TeamCategory;
use crate::services::MemberDraft;
use crate::ui::Toast;

/// What a team form submission asks for
#[derive(Debug, Clone, PartialEq, Eq)]
enum FormAction {
    AddDegree(String),
    RemoveDegree(usize),
    /// Re-render the form as submitted
    Redisplay,
    Save,
}

impl FormAction {
    fn parse(pairs: &[(String, String)]) -> Self {
        let action = form_value(pairs, "action");
        if action == "add_degree" {
            return FormAction::AddDegree(form_value(pairs, "new_degree"));
        }
        if let Some(index) = action.strip_prefix("remove_degree:") {
            return match index.trim().parse() {
                Ok(index) => FormAction::RemoveDegree(index),
                Err(_) => FormAction::Redisplay,
            };
        }
        FormAction::Save
    }
}

fn member_draft(pairs: &[(String, String)]) -> MemberDraft {
    MemberDraft {
        id: form_value(pairs, "id"),
        name: form_value(pairs, "name"),
        title: form_value(pairs, "title"),
        image_url: form_value(pairs, "image_url"),
        degrees: form_values(pairs, "degrees"),
        bio: form_value(pairs, "bio"),
        category: TeamCategory::parse(&form_value(pairs, "category")).unwrap_or_default(),
    }
}

async fn render_list(
    state: &AppState,
    user: CurrentUser,
    toast: Option<Toast>,
    status: StatusCode,
) -> Result<Response, WebError> {
    let members = state.team_service.list_members().await?;
    let placeholder = &state.config.site.placeholder_image;
    let rows: Vec<MemberCard> = members.iter().map(|m| MemberCard::new(m, placeholder)).collect();

    let mut ctx = TeraContext::new();
    ctx.insert("members", &rows);
    let vars = state.page_vars("/admin/team", user.0, toast);
    let html = state.render("admin_team.html", &ctx, &vars)?;
    Ok((status, html).into_response())
}

fn render_form(
    state: &AppState,
    user: CurrentUser,
    draft: &MemberDraft,
    new_degree: &str,
    toast: Option<Toast>,
    status: StatusCode,
) -> Result<Response, WebError> {
    let categories: Vec<SelectOption> = TeamCategory::ALL
        .iter()
        .map(|c| SelectOption::new(c.as_str(), c.label(), draft.category.as_str()))
        .collect();

    let mut ctx = TeraContext::new();
    ctx.insert("draft", draft);
    ctx.insert("is_new", &draft.is_new());
    ctx.insert("categories", &categories);
    ctx.insert("new_degree", new_degree);
    let vars = state.page_vars("/admin/team", user.0, toast);
    let html = state.render("admin_team_form.html", &ctx, &vars)?;
    Ok((status, html).into_response())
}

/// GET /admin/team
pub async fn index(State(state): State<AppState>, user: CurrentUser) -> Result<Response, WebError> {
    render_list(&state, user, None, StatusCode::OK).await
}

/// GET /admin/team/new
pub async fn new_member(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, WebError> {
    render_form(&state, user, &MemberDraft::default(), "", None, StatusCode::OK)
}

/// GET /admin/team/{id}/edit
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let member = state
        .team_service
        .get_member(&id)
        .await?
        .ok_or_else(|| WebError::not_found("Team member not found"))?;
    render_form(&state, user, &MemberDraft::from_member(&member), "", None, StatusCode::OK)
}

/// POST /admin/team - Degree edits or save
pub async fn save(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, WebError> {
    let mut draft = member_draft(&pairs);

    match FormAction::parse(&pairs) {
        FormAction::AddDegree(degree) => {
            // A blank degree keeps the input so the editor can fix it
            let leftover = if draft.add_degree(&degree) { "" } else { degree.as_str() };
            render_form(&state, user, &draft, leftover, None, StatusCode::OK)
        }
        FormAction::RemoveDegree(index) => {
            draft.remove_degree(index);
            let new_degree = form_value(&pairs, "new_degree");
            render_form(&state, user, &draft, &new_degree, None, StatusCode::OK)
        }
        FormAction::Redisplay => {
            let new_degree = form_value(&pairs, "new_degree");
            render_form(&state, user, &draft, &new_degree, None, StatusCode::OK)
        }
        FormAction::Save => match state.team_service.save_member(&draft).await {
            Ok(outcome) => {
                let toast = Toast::saved("Team member", outcome, draft.name.trim());
                render_list(&state, user, Some(toast), StatusCode::OK).await
            }
            Err(err) => {
                let (toast, status) = failure("save team member", &err);
                let new_degree = form_value(&pairs, "new_degree");
                render_form(&state, user, &draft, &new_degree, Some(toast), status)
            }
        },
    }
}

/// POST /admin/team/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let (toast, status) = match state.team_service.delete_member(&id).await {
        Ok(()) => (Toast::deleted("Team member"), StatusCode::OK),
        Err(err) => failure("delete team member", &err),
    };
    render_list(&state, user, Some(toast), status).await
}
