//! Toast notifications
//!
//! Transient messages rendered at the top of the next page. Handlers build
//! them from operation results; they never block the page.

use crate::services::{SaveOutcome, ServiceError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn validation(description: impl Into<String>) -> Self {
        Self {
            title: "Validation Error".to_string(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    /// "Post created" / "Successfully created post: <name>"
    pub fn saved(entity: &str, outcome: SaveOutcome, name: &str) -> Self {
        let verb = match outcome {
            SaveOutcome::Created => "created",
            SaveOutcome::Updated => "updated",
        };
        Self::success(
            outcome.message(entity),
            format!("Successfully {verb} {}: {name}", entity.to_lowercase()),
        )
    }

    /// "Post deleted" / "Successfully deleted post"
    pub fn deleted(entity: &str) -> Self {
        Self::success(
            format!("{entity} deleted"),
            format!("Successfully deleted {}", entity.to_lowercase()),
        )
    }

    /// Validation errors keep their message; other failures read
    /// "Failed to <action>: <message>"
    pub fn from_error(action: &str, err: &ServiceError) -> Self {
        match err {
            ServiceError::Validation(v) => Self::validation(v.message.clone()),
            other => Self::error(format!("Failed to {action}: {other}")),
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}
