//! Template view models
//!
//! Shapes handed to the templates. Display strings (labels, formatted
//! dates, image fallbacks) are worked out here so the markup stays free of
//! logic.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{BlogAuthor, BlogPostView, BlogTag, Event, TeamMember};
use crate::services::MarkdownRenderer;
use crate::ui::calendar::{selected_heading, NO_EVENTS_MESSAGE};
use crate::ui::{image_or_placeholder, CalendarMonth};

/// "March 5, 2024"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Event card on the public events page and in admin listings
#[derive(Debug, Clone, Serialize)]
pub struct EventCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub date_label: String,
    pub time: String,
    pub location: String,
    pub type_label: String,
    pub price_label: String,
    pub spots_label: Option<String>,
    pub is_virtual: bool,
    pub sold_out: bool,
    pub registration_count: i64,
}

impl From<&Event> for EventCard {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.format("%Y-%m-%d").to_string(),
            date_label: long_date(event.date),
            time: event.time.clone(),
            location: event.location.clone(),
            type_label: event.event_type.label(),
            price_label: event.price_label(),
            spots_label: event.spots_label(),
            is_virtual: event.is_virtual(),
            sold_out: event.is_sold_out(),
            registration_count: event.registration_count,
        }
    }
}

/// One calendar cell
#[derive(Debug, Clone, Serialize)]
pub struct CalendarCell {
    pub day: u32,
    pub date: String,
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub event_titles: Vec<String>,
}

/// The calendar block of the events page
#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub title: String,
    pub month: String,
    pub prev_month: String,
    pub next_month: String,
    pub weeks: Vec<Vec<CalendarCell>>,
    pub selected_heading: Option<String>,
    pub selected_events: Option<Vec<EventCard>>,
    pub no_events_message: &'static str,
}

impl CalendarView {
    pub fn new(calendar: &CalendarMonth, events: &[Event]) -> Self {
        let weeks = calendar
            .weeks()
            .into_iter()
            .map(|week| {
                week.iter()
                    .map(|day| CalendarCell {
                        day: day.day,
                        date: day.date.format("%Y-%m-%d").to_string(),
                        in_month: day.in_month,
                        is_today: day.is_today,
                        is_selected: day.is_selected,
                        event_titles: day.events.iter().map(|e| e.title.clone()).collect(),
                    })
                    .collect()
            })
            .collect();

        Self {
            title: calendar.title(),
            month: calendar.month.format("%Y-%m").to_string(),
            prev_month: calendar.prev_param(),
            next_month: calendar.next_param(),
            weeks,
            selected_heading: calendar.selected.map(selected_heading),
            selected_events: calendar
                .selected_events(events)
                .map(|list| list.iter().map(EventCard::from).collect()),
            no_events_message: NO_EVENTS_MESSAGE,
        }
    }
}

/// Author block with the avatar already resolved
#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: String,
    pub name: String,
    pub role: String,
    pub avatar_url: String,
}

impl AuthorView {
    pub fn new(author: &BlogAuthor, placeholder: &str) -> Self {
        Self {
            id: author.id.clone(),
            name: author.name.clone(),
            role: author.role.clone(),
            avatar_url: image_or_placeholder(author.avatar_url.as_deref(), placeholder).to_string(),
        }
    }
}

/// Post card in the blog listing
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub image_url: String,
    pub date_label: String,
    pub author: Option<AuthorView>,
    pub tags: Vec<BlogTag>,
}

impl PostCard {
    pub fn new(view: &BlogPostView, placeholder: &str) -> Self {
        Self {
            id: view.post.id.clone(),
            title: view.post.title.clone(),
            preview: view.post.preview.clone(),
            image_url: image_or_placeholder(Some(&view.post.image_url), placeholder).to_string(),
            date_label: long_date(view.post.created_at.date_naive()),
            author: view.author.as_ref().map(|a| AuthorView::new(a, placeholder)),
            tags: view.tags.clone(),
        }
    }
}

/// Full post page
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    #[serde(flatten)]
    pub card: PostCard,
    pub content_html: String,
}

impl PostPage {
    pub fn new(view: &BlogPostView, placeholder: &str, renderer: &MarkdownRenderer) -> Self {
        Self {
            card: PostCard::new(view, placeholder),
            content_html: renderer.render(&view.post.content),
        }
    }
}

/// Tag filter button
#[derive(Debug, Clone, Serialize)]
pub struct TagChip {
    pub id: String,
    pub name: String,
    pub selected: bool,
    /// Query value that clicking the chip applies; empty clears the filter
    pub toggle: String,
}

/// Team member card
#[derive(Debug, Clone, Serialize)]
pub struct MemberCard {
    pub id: String,
    pub name: String,
    pub title: String,
    pub image_url: String,
    pub degrees: Vec<String>,
    pub bio: String,
    pub category: &'static str,
    pub category_label: &'static str,
}

impl MemberCard {
    pub fn new(member: &TeamMember, placeholder: &str) -> Self {
        Self {
            id: member.id.clone(),
            name: member.name.clone(),
            title: member.title.clone(),
            image_url: image_or_placeholder(Some(&member.image_url), placeholder).to_string(),
            degrees: member.degrees.clone(),
            bio: member.bio.clone(),
            category: member.category.as_str(),
            category_label: member.category.label(),
        }
    }
}

/// `<select>` option
#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, current: &str) -> Self {
        let value = value.into();
        let selected = value == current;
        Self {
            value,
            label: label.into(),
            selected,
        }
    }
}
