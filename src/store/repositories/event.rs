//! Event repository
//!
//! Events carry a derived registration count that is looked up from
//! `event_registrations` for every event read.

use crate::models::{Event, EventInput, EventRegistration, NewRegistration};
use crate::store::{first_row, from_rows, tables, to_row, DynStore, Filter, Query, StoreError};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;

/// Event repository trait
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All events by date ascending, with registration counts
    async fn list(&self) -> Result<Vec<Event>, StoreError>;

    /// One event with its registration count
    async fn get_by_id(&self, id: &str) -> Result<Option<Event>, StoreError>;

    async fn create(&self, input: &EventInput) -> Result<Event, StoreError>;

    async fn update(&self, id: &str, input: &EventInput) -> Result<Event, StoreError>;

    /// Delete an event; its registrations go with it
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Number of registrations for an event
    async fn registration_count(&self, event_id: &str) -> Result<u64, StoreError>;

    async fn register(&self, registration: &NewRegistration)
        -> Result<EventRegistration, StoreError>;
}

/// `DataStore`-backed event repository
pub struct StoreEventRepository {
    store: DynStore,
}

impl StoreEventRepository {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(store: DynStore) -> Arc<dyn EventRepository> {
        Arc::new(Self::new(store))
    }

    async fn with_count(&self, mut event: Event) -> Result<Event, StoreError> {
        event.registration_count = self.registration_count(&event.id).await? as i64;
        Ok(event)
    }
}

#[async_trait]
impl EventRepository for StoreEventRepository {
    async fn list(&self) -> Result<Vec<Event>, StoreError> {
        let rows = self
            .store
            .select(tables::EVENTS, &Query::new().order_by("date", true))
            .await?;
        let events: Vec<Event> = from_rows(rows)?;
        try_join_all(events.into_iter().map(|event| self.with_count(event))).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let rows = self
            .store
            .select(tables::EVENTS, &Query::new().filter("id", id).limit(1))
            .await?;
        let events: Vec<Event> = from_rows(rows)?;
        match events.into_iter().next() {
            Some(event) => Ok(Some(self.with_count(event).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: &EventInput) -> Result<Event, StoreError> {
        let rows = self.store.insert(tables::EVENTS, vec![to_row(input)?]).await?;
        first_row(rows, "created event")
    }

    async fn update(&self, id: &str, input: &EventInput) -> Result<Event, StoreError> {
        let rows = self
            .store
            .update(tables::EVENTS, &[Filter::eq("id", id)], to_row(input)?)
            .await?;
        let event: Event = first_row(rows, &format!("event {id}"))?;
        self.with_count(event).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store
            .delete(tables::EVENTS, &[Filter::eq("id", id)])
            .await
    }

    async fn registration_count(&self, event_id: &str) -> Result<u64, StoreError> {
        self.store
            .count(
                tables::EVENT_REGISTRATIONS,
                &[Filter::eq("event_id", event_id)],
            )
            .await
    }

    async fn register(
        &self,
        registration: &NewRegistration,
    ) -> Result<EventRegistration, StoreError> {
        let rows = self
            .store
            .insert(tables::EVENT_REGISTRATIONS, vec![to_row(registration)?])
            .await?;
        first_row(rows, "created registration")
    }
}
