//! Event service
//!
//! Featured events, registration, and the admin editor for events.

use super::{non_blank, require, SaveOutcome, ServiceError, ValidationError};
use crate::models::{
    AuthUser, Event, EventInput, EventType, NewRegistration, RegistrationStatus,
};
use crate::store::repositories::EventRepository;
use crate::store::StoreError;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Why a registration was refused
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Please log in to register for events")]
    LoginRequired,

    #[error("Event is full")]
    EventFull,

    #[error("Event not found")]
    NotFound,

    /// Store failure; the message is shown to the visitor as-is
    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Successful registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Free event, registration confirmed
    Confirmed,
    /// Paid event, payment still to be collected
    AwaitingPayment,
}

impl RegistrationOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            RegistrationOutcome::Confirmed => "Registration successful!",
            RegistrationOutcome::AwaitingPayment => {
                "You will be redirected to payment processing (not implemented yet)"
            }
        }
    }
}

/// Events on or after `today`, soonest first
pub fn upcoming_events(events: &[Event], today: NaiveDate) -> Vec<Event> {
    let mut upcoming: Vec<Event> = events.iter().filter(|e| e.date >= today).cloned().collect();
    upcoming.sort_by_key(|e| e.date);
    upcoming
}

/// Editable state of an event in the admin form.
///
/// Numeric and date fields stay as submitted text until validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub max_participants: String,
    #[serde(default)]
    pub zoom_webinar_id: String,
}

impl EventDraft {
    /// Blank workshop on `today`, free and uncapped
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            event_type: EventType::Workshop.as_str().to_string(),
            price: "0".to_string(),
            ..Default::default()
        }
    }

    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.format("%Y-%m-%d").to_string(),
            time: event.time.clone(),
            location: event.location.clone(),
            event_type: event.event_type.as_str().to_string(),
            price: event.price.to_string(),
            max_participants: event
                .max_participants
                .map(|m| m.to_string())
                .unwrap_or_default(),
            zoom_webinar_id: event.zoom_webinar_id.clone().unwrap_or_default(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.trim().is_empty()
    }

    /// Check required fields in order, then parse the typed ones
    pub fn validate(&self) -> Result<EventInput, ValidationError> {
        require("title", "Title", &self.title)?;
        require("date", "Date", &self.date)?;
        require("time", "Time", &self.time)?;
        require("location", "Location", &self.location)?;

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::new("date", "Date is invalid"))?;

        let price = match non_blank(&self.price) {
            None => 0.0,
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite())
                .ok_or_else(|| ValidationError::new("price", "Price must be a number"))?,
        };
        if price < 0.0 {
            return Err(ValidationError::new("price", "Price cannot be negative"));
        }

        let max_participants = match non_blank(&self.max_participants) {
            None => None,
            Some(raw) => Some(
                raw.parse::<i64>()
                    .ok()
                    .filter(|m| *m > 0)
                    .ok_or_else(|| {
                        ValidationError::new(
                            "max_participants",
                            "Max participants must be a positive whole number",
                        )
                    })?,
            ),
        };

        Ok(EventInput {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            date,
            time: self.time.trim().to_string(),
            location: self.location.trim().to_string(),
            event_type: EventType::parse(&self.event_type).unwrap_or_default(),
            price,
            max_participants,
            zoom_webinar_id: non_blank(&self.zoom_webinar_id),
            updated_at: Utc::now(),
        })
    }
}

/// Event service
pub struct EventService {
    repo: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    /// All events by date with registration counts
    pub async fn list_events(&self) -> Result<Vec<Event>, ServiceError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_event(&self, id: &str) -> Result<Option<Event>, ServiceError> {
        Ok(self.repo.get_by_id(id).await?)
    }

    /// Register `user` for an event.
    ///
    /// Requires a signed-in user and a seat; paid events start out
    /// awaiting payment.
    pub async fn register(
        &self,
        event_id: &str,
        user: Option<&AuthUser>,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        let user = user.ok_or(RegistrationError::LoginRequired)?;
        let event = self
            .repo
            .get_by_id(event_id)
            .await?
            .ok_or(RegistrationError::NotFound)?;

        if event.is_sold_out() {
            return Err(RegistrationError::EventFull);
        }

        let status = RegistrationStatus::initial_for(&event);
        let registration = self
            .repo
            .register(&NewRegistration {
                event_id: event.id.clone(),
                user_id: user.id.clone(),
                status,
            })
            .await?;
        tracing::info!(
            event_id = %event.id,
            registration_id = %registration.id,
            status = ?status,
            "Event registration created"
        );

        Ok(match status {
            RegistrationStatus::AwaitingPayment => RegistrationOutcome::AwaitingPayment,
            _ => RegistrationOutcome::Confirmed,
        })
    }

    pub async fn save_event(&self, draft: &EventDraft) -> Result<SaveOutcome, ServiceError> {
        let input = draft.validate()?;
        if draft.is_new() {
            let event = self.repo.create(&input).await?;
            tracing::info!(event_id = %event.id, "Event created");
            Ok(SaveOutcome::Created)
        } else {
            let event = self.repo.update(draft.id.trim(), &input).await?;
            tracing::info!(event_id = %event.id, "Event updated");
            Ok(SaveOutcome::Updated)
        }
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        tracing::info!(event_id = %id, "Event deleted");
        Ok(())
    }
}
