//! Team service
//!
//! Public team listing with category filtering, and the admin editor for
//! team members including the ordered degree list.

use super::{require, SaveOutcome, ServiceError, ValidationError};
use crate::models::{TeamCategory, TeamMember, TeamMemberInput};
use crate::store::repositories::TeamRepository;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Category selection on the public team page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(TeamCategory),
}

impl CategoryFilter {
    /// `all` or a category id; anything else falls back to `All`
    pub fn parse(s: &str) -> Self {
        TeamCategory::parse(s)
            .map(CategoryFilter::Only)
            .unwrap_or(CategoryFilter::All)
    }

    pub fn id(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.plural_label(),
        }
    }

    /// Filter buttons in display order
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(TeamCategory::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn matches(&self, member: &TeamMember) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => member.category == *category,
        }
    }
}

/// Members accepted by `filter`, order preserved
pub fn filter_members(members: &[TeamMember], filter: CategoryFilter) -> Vec<&TeamMember> {
    members.iter().filter(|m| filter.matches(m)).collect()
}

/// Editable state of a team member in the admin form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberDraft {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub degrees: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub category: TeamCategory,
}

impl MemberDraft {
    pub fn from_member(member: &TeamMember) -> Self {
        Self {
            id: member.id.clone(),
            name: member.name.clone(),
            title: member.title.clone(),
            image_url: member.image_url.clone(),
            degrees: member.degrees.clone(),
            bio: member.bio.clone(),
            category: member.category,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.trim().is_empty()
    }

    /// Append a degree; blank input is ignored
    pub fn add_degree(&mut self, degree: &str) -> bool {
        let degree = degree.trim();
        if degree.is_empty() {
            return false;
        }
        self.degrees.push(degree.to_string());
        true
    }

    /// Remove the degree at `index`; out-of-range indexes are ignored
    pub fn remove_degree(&mut self, index: usize) -> Option<String> {
        (index < self.degrees.len()).then(|| self.degrees.remove(index))
    }

    /// Name first, then title
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", "Name", &self.name)?;
        require("title", "Title", &self.title)?;
        Ok(())
    }

    fn to_input(&self) -> TeamMemberInput {
        TeamMemberInput {
            name: self.name.trim().to_string(),
            title: self.title.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            degrees: self.degrees.clone(),
            bio: self.bio.clone(),
            category: self.category,
            updated_at: Utc::now(),
        }
    }
}

/// Team service
pub struct TeamService {
    repo: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(repo: Arc<dyn TeamRepository>) -> Self {
        Self { repo }
    }

    /// Members ordered by name
    pub async fn list_members(&self) -> Result<Vec<TeamMember>, ServiceError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_member(&self, id: &str) -> Result<Option<TeamMember>, ServiceError> {
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn save_member(&self, draft: &MemberDraft) -> Result<SaveOutcome, ServiceError> {
        draft.validate()?;
        let input = draft.to_input();
        if draft.is_new() {
            let member = self.repo.create(&input).await?;
            tracing::info!(member_id = %member.id, "Team member created");
            Ok(SaveOutcome::Created)
        } else {
            let member = self.repo.update(draft.id.trim(), &input).await?;
            tracing::info!(member_id = %member.id, "Team member updated");
            Ok(SaveOutcome::Updated)
        }
    }

    pub async fn delete_member(&self, id: &str) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        tracing::info!(member_id = %id, "Team member deleted");
        Ok(())
    }
}
