//! Team member repository

use crate::models::{TeamMember, TeamMemberInput};
use crate::store::{first_row, from_rows, tables, to_row, DynStore, Filter, Query, StoreError};
use async_trait::async_trait;
use std::sync::Arc;

/// Team repository trait
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// All members ordered by name
    async fn list(&self) -> Result<Vec<TeamMember>, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<TeamMember>, StoreError>;

    async fn create(&self, input: &TeamMemberInput) -> Result<TeamMember, StoreError>;

    async fn update(&self, id: &str, input: &TeamMemberInput) -> Result<TeamMember, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// `DataStore`-backed team repository
pub struct StoreTeamRepository {
    store: DynStore,
}

impl StoreTeamRepository {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(store: DynStore) -> Arc<dyn TeamRepository> {
        Arc::new(Self::new(store))
    }
}

#[async_trait]
impl TeamRepository for StoreTeamRepository {
    async fn list(&self) -> Result<Vec<TeamMember>, StoreError> {
        let rows = self
            .store
            .select(tables::TEAM_MEMBERS, &Query::new().order_by("name", true))
            .await?;
        from_rows(rows)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<TeamMember>, StoreError> {
        let rows = self
            .store
            .select(tables::TEAM_MEMBERS, &Query::new().filter("id", id).limit(1))
            .await?;
        Ok(from_rows(rows)?.into_iter().next())
    }

    async fn create(&self, input: &TeamMemberInput) -> Result<TeamMember, StoreError> {
        let rows = self
            .store
            .insert(tables::TEAM_MEMBERS, vec![to_row(input)?])
            .await?;
        first_row(rows, "created team member")
    }

    async fn update(&self, id: &str, input: &TeamMemberInput) -> Result<TeamMember, StoreError> {
        let rows = self
            .store
            .update(tables::TEAM_MEMBERS, &[Filter::eq("id", id)], to_row(input)?)
            .await?;
        first_row(rows, &format!("team member {id}"))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store
            .delete(tables::TEAM_MEMBERS, &[Filter::eq("id", id)])
            .await
    }
}
