//! Marketing pages
//!
//! Home, service detail, story, results, team, careers and the login stub.
//! Everything but the team page is compiled-in copy.

use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::{Deserialize, Serialize};
use tera::Context as TeraContext;

use super::middleware::{AppState, CurrentUser, WebError};
use super::responses::MemberCard;
use crate::content::{self, SuccessStory};
use crate::services::team::filter_members;
use crate::services::CategoryFilter;
use crate::ui::carousel::SWIPE_CONFIDENCE_THRESHOLD;
use crate::ui::Carousel;

/// GET / - Hero and services overview
pub async fn home(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, WebError> {
    let mut ctx = TeraContext::new();
    ctx.insert("hero", &content::HERO);
    ctx.insert("services", &content::SERVICES);
    ctx.insert("stats", &content::STATS);
    state.render("home.html", &ctx, &state.page_vars("/", user.0, None))
}

/// GET /services/{slug}
pub async fn service(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: CurrentUser,
) -> Result<Html<String>, WebError> {
    let service = content::find_service(&slug)
        .ok_or_else(|| WebError::not_found(format!("No service called '{slug}'")))?;

    let mut ctx = TeraContext::new();
    ctx.insert("service", service);
    ctx.insert("services", &content::SERVICES);
    let path = format!("/services/{slug}");
    state.render("service.html", &ctx, &state.page_vars(&path, user.0, None))
}

/// GET /about/story
pub async fn story(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, WebError> {
    let mut ctx = TeraContext::new();
    ctx.insert("hero", &content::HERO);
    ctx.insert("offices", &content::OFFICES);
    state.render("story.html", &ctx, &state.page_vars("/about/story", user.0, None))
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultsQuery {
    /// Testimonial index; wraps around
    pub t: Option<i64>,
    /// Direction of the step that led to `t`
    pub d: Option<i64>,
    /// Expanded success story
    pub story: Option<usize>,
}

#[derive(Debug, Serialize)]
struct StoryView {
    story: SuccessStory,
    expanded: bool,
    paragraphs: Vec<&'static str>,
    /// `story` query value for the read more / show less link
    toggle: Option<usize>,
}

#[derive(Debug, Serialize)]
struct DotView {
    index: usize,
    active: bool,
    direction: i64,
}

/// GET /about/story/results - Statistics, testimonials and success stories
pub async fn results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
    user: CurrentUser,
) -> Result<Html<String>, WebError> {
    let carousel = Carousel::at(content::TESTIMONIALS.len(), query.t.unwrap_or(0))
        .with_direction(query.d.unwrap_or(0));
    let dots: Vec<DotView> = (0..carousel.len())
        .map(|index| DotView {
            index,
            active: index == carousel.index(),
            direction: carousel.jump_direction(index),
        })
        .collect();

    let stories: Vec<StoryView> = content::SUCCESS_STORIES
        .iter()
        .enumerate()
        .map(|(i, story)| {
            let expanded = query.story == Some(i);
            StoryView {
                story: *story,
                expanded,
                paragraphs: story.paragraphs(),
                toggle: if expanded { None } else { Some(i) },
            }
        })
        .collect();

    let mut ctx = TeraContext::new();
    ctx.insert("stats", &content::STATS);
    ctx.insert("testimonial", &content::TESTIMONIALS[carousel.index()]);
    ctx.insert("testimonial_index", &carousel.index());
    ctx.insert("prev_index", &carousel.prev_index());
    ctx.insert("next_index", &carousel.next_index());
    ctx.insert("dots", &dots);
    ctx.insert("enters_from", carousel.enters_from());
    ctx.insert("swipe_threshold", &SWIPE_CONFIDENCE_THRESHOLD);
    ctx.insert("stories", &stories);
    ctx.insert("expanded_story", &query.story);
    state.render(
        "results.html",
        &ctx,
        &state.page_vars("/about/story/results", user.0, None),
    )
}

#[derive(Debug, Default, Deserialize)]
pub struct TeamQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
struct FilterButton {
    id: &'static str,
    label: &'static str,
    active: bool,
}

/// GET /about/team - Members by name, filtered by category
pub async fn team(
    State(state): State<AppState>,
    Query(query): Query<TeamQuery>,
    user: CurrentUser,
) -> Result<Html<String>, WebError> {
    let filter = query
        .category
        .as_deref()
        .map(CategoryFilter::parse)
        .unwrap_or_default();

    let members = state.team_service.list_members().await?;
    let placeholder = &state.config.site.placeholder_image;
    let cards: Vec<MemberCard> = filter_members(&members, filter)
        .into_iter()
        .map(|m| MemberCard::new(m, placeholder))
        .collect();

    let buttons: Vec<FilterButton> = CategoryFilter::options()
        .into_iter()
        .map(|option| FilterButton {
            id: option.id(),
            label: option.label(),
            active: option == filter,
        })
        .collect();

    let mut ctx = TeraContext::new();
    ctx.insert("members", &cards);
    ctx.insert("filters", &buttons);
    ctx.insert("empty_message", "No team members found in this category.");
    state.render("team.html", &ctx, &state.page_vars("/about/team", user.0, None))
}

/// GET /careers
pub async fn careers(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, WebError> {
    #[derive(Serialize)]
    struct Opening {
        #[serde(flatten)]
        job: content::JobOpening,
        mailto: String,
    }

    let openings: Vec<Opening> = content::JOB_OPENINGS
        .iter()
        .map(|job| Opening {
            job: *job,
            mailto: job.mailto(),
        })
        .collect();

    let mut ctx = TeraContext::new();
    ctx.insert("openings", &openings);
    state.render("careers.html", &ctx, &state.page_vars("/careers", user.0, None))
}

/// GET /login - Sign-in happens on the hosted backend
pub async fn login(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, WebError> {
    let ctx = TeraContext::new();
    state.render("login.html", &ctx, &state.page_vars("/login", user.0, None))
}
