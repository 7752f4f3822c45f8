//! Event models
//!
//! Events from the `events` table with their derived registration count,
//! and registrations from `event_registrations`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    #[default]
    Workshop,
    Seminar,
    InfoSession,
}

impl EventType {
    pub const ALL: [EventType; 3] = [
        EventType::Workshop,
        EventType::Seminar,
        EventType::InfoSession,
    ];

    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Workshop => "workshop",
            EventType::Seminar => "seminar",
            EventType::InfoSession => "info-session",
        }
    }

    /// Badge text: the stored value with its first letter upper-cased
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Option text in the admin editor
    pub fn option_label(&self) -> &'static str {
        match self {
            EventType::Workshop => "Workshop",
            EventType::Seminar => "Seminar",
            EventType::InfoSession => "Info Session",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "workshop" => Some(EventType::Workshop),
            "seminar" => Some(EventType::Seminar),
            "info-session" => Some(EventType::InfoSession),
            _ => None,
        }
    }
}

/// Event row plus its derived registration count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_event_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub event_type: EventType,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: f64,
    #[serde(default)]
    pub max_participants: Option<i64>,
    #[serde(default)]
    pub zoom_webinar_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Filled in from `event_registrations`; never written back
    #[serde(default, skip_serializing)]
    pub registration_count: i64,
}

impl Event {
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }

    /// An event is full once its registrations reach the participant cap.
    ///
    /// Events without a cap never sell out, and neither does an event with
    /// no registrations at all.
    pub fn is_sold_out(&self) -> bool {
        match self.max_participants {
            Some(max) if max > 0 => {
                self.registration_count > 0 && self.registration_count >= max
            }
            _ => false,
        }
    }

    /// "Free" or "$<price>"
    pub fn price_label(&self) -> String {
        if self.is_free() {
            "Free".to_string()
        } else {
            format!("${}", self.price)
        }
    }

    /// "<count>/<max> spots filled" when a cap is set
    pub fn spots_label(&self) -> Option<String> {
        self.max_participants
            .filter(|max| *max > 0)
            .map(|max| format!("{}/{} spots filled", self.registration_count, max))
    }

    /// Events with a Zoom webinar are held online
    pub fn is_virtual(&self) -> bool {
        self.zoom_webinar_id
            .as_deref()
            .map(|id| !id.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Fields written when creating or updating an event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventInput {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub price: f64,
    pub max_participants: Option<i64>,
    pub zoom_webinar_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Registration lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Cancelled,
    AwaitingPayment,
}

impl RegistrationStatus {
    /// Status a new registration starts in: paid events wait for payment
    pub fn initial_for(event: &Event) -> Self {
        if event.price > 0.0 {
            RegistrationStatus::AwaitingPayment
        } else {
            RegistrationStatus::Confirmed
        }
    }
}

/// Registration row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRegistration {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub status: RegistrationStatus,
    #[serde(default)]
    pub stripe_payment_id: Option<String>,
    #[serde(default)]
    pub zoom_registrant_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written when registering for an event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewRegistration {
    pub event_id: String,
    pub user_id: String,
    pub status: RegistrationStatus,
}

/// Accepts both `2024-03-15` and full timestamps such as
/// `2024-03-15T00:00:00+00:00`; only the calendar date is kept.
fn deserialize_event_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
