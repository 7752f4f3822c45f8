//! Team member model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Team grouping used for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TeamCategory {
    #[default]
    Leadership,
    Counselor,
    Coach,
    Tutor,
}

impl TeamCategory {
    pub const ALL: [TeamCategory; 4] = [
        TeamCategory::Leadership,
        TeamCategory::Counselor,
        TeamCategory::Coach,
        TeamCategory::Tutor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamCategory::Leadership => "leadership",
            TeamCategory::Counselor => "counselor",
            TeamCategory::Coach => "coach",
            TeamCategory::Tutor => "tutor",
        }
    }

    /// Singular label used by the admin editor
    pub fn label(&self) -> &'static str {
        match self {
            TeamCategory::Leadership => "Leadership",
            TeamCategory::Counselor => "Counselor",
            TeamCategory::Coach => "Coach",
            TeamCategory::Tutor => "Tutor",
        }
    }

    /// Plural label used by the public filter buttons
    pub fn plural_label(&self) -> &'static str {
        match self {
            TeamCategory::Leadership => "Leadership",
            TeamCategory::Counselor => "Counselors",
            TeamCategory::Coach => "Coaches",
            TeamCategory::Tutor => "Tutors",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        TeamCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim().to_lowercase())
    }
}

/// Team member row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    /// Degrees in display order
    #[serde(default)]
    pub degrees: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub category: TeamCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written when creating or updating a team member
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeamMemberInput {
    pub name: String,
    pub title: String,
    pub image_url: String,
    pub degrees: Vec<String>,
    pub bio: String,
    pub category: TeamCategory,
    pub updated_at: DateTime<Utc>,
}
