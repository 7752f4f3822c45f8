//! Services layer - Business logic
//!
//! Services sit between the HTTP handlers and the typed repositories:
//! - validating admin drafts before any store call
//! - deriving page state (filters, upcoming events, sold-out checks)
//! - running the simulated contact submission

pub mod blog;
pub mod contact;
pub mod event;
pub mod markdown;
pub mod team;

pub use blog::{AuthorDraft, BlogService, PostDraft, TagDraft};
pub use contact::{ContactForm, ContactService, ContactStatus, FieldErrors};
pub use event::{EventDraft, EventService, RegistrationError, RegistrationOutcome};
pub use markdown::MarkdownRenderer;
pub use team::{CategoryFilter, MemberDraft, TeamService};

use crate::store::StoreError;

/// A required field was missing or malformed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Form field the message belongs to
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Error types for service operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input rejected before reaching the store
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Entity not found
    #[error("{0} not found")]
    NotFound(String),

    /// The store call failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Whether a save inserted a new row or changed an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

impl SaveOutcome {
    /// "<entity> created" / "<entity> updated"
    pub fn message(&self, entity: &str) -> String {
        match self {
            SaveOutcome::Created => format!("{entity} created"),
            SaveOutcome::Updated => format!("{entity} updated"),
        }
    }
}

/// Fail with "<label> is required" when `value` is blank
pub(crate) fn require(
    field: &'static str,
    label: &str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, format!("{label} is required")))
    } else {
        Ok(())
    }
}

/// `None` for a blank string, the trimmed value otherwise
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
