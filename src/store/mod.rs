//! External store layer
//!
//! Table-oriented access to the hosted backend that persists blog posts,
//! events and team members. The application never talks to the backend
//! directly: everything goes through the `DataStore` trait so that a
//! development instance can run against the in-process `MemoryStore`.
//!
//! # Architecture
//!
//! - `DataStore` exposes select/insert/update/delete/count over JSON rows
//! - `RestStore` speaks the PostgREST dialect of the hosted backend
//! - `MemoryStore` keeps tables in memory and can seed demo content
//! - `repositories` wraps the raw rows in typed, per-entity repositories
//!
//! # Usage
//!
//! ```ignore
//! use galin_site::config::StoreConfig;
//! use galin_site::store::{create_store, Query, tables};
//!
//! let store = create_store(&StoreConfig::default())?;
//! let rows = store.select(tables::EVENTS, &Query::new().order_by("date", true)).await?;
//! ```

pub mod memory;
pub mod repositories;
pub mod rest;
pub mod seed;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::config::{StoreConfig, StoreDriver};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// A single table row as returned by the backend
pub type Row = serde_json::Map<String, Value>;

/// Shared store handle
pub type DynStore = Arc<dyn DataStore>;

/// Table names used by the site
pub mod tables {
    pub const BLOG_POSTS: &str = "blog_posts";
    pub const BLOG_AUTHORS: &str = "blog_authors";
    pub const BLOG_TAGS: &str = "blog_tags";
    pub const BLOG_POSTS_TAGS: &str = "blog_posts_tags";
    pub const EVENTS: &str = "events";
    pub const EVENT_REGISTRATIONS: &str = "event_registrations";
    pub const TEAM_MEMBERS: &str = "team_members";
}

/// Store error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// A row could not be converted to or from its model
    #[error("Invalid row data: {0}")]
    Decode(String),

    /// The requested row does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

/// Equality filter on one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether `row` satisfies this filter.
    ///
    /// Non-string values are compared through their JSON text, so
    /// `eq("price", "0")` matches a numeric `0`.
    pub fn matches(&self, row: &Row) -> bool {
        match row.get(&self.column) {
            Some(Value::String(s)) => *s == self.value,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == self.value,
        }
    }
}

/// Sort order for a select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Parameters of a select
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Table-oriented data store
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Rows matching every filter, in the requested order
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, StoreError>;

    /// Insert rows and return them as stored (with `id` and timestamps)
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, StoreError>;

    /// Apply `patch` to every matching row and return the updated rows
    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Row,
    ) -> Result<Vec<Row>, StoreError>;

    /// Delete every matching row
    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError>;

    /// Number of matching rows
    async fn count(&self, table: &str, filters: &[Filter]) -> Result<u64, StoreError>;

    /// Short backend name for logs
    fn driver(&self) -> &'static str;
}

/// Create the store selected by configuration
pub fn create_store(config: &StoreConfig) -> Result<DynStore, StoreError> {
    match config.driver {
        StoreDriver::Memory => {
            let store = if config.seed_demo {
                MemoryStore::with_demo_data()
            } else {
                MemoryStore::new()
            };
            tracing::info!(seeded = config.seed_demo, "Using in-memory store");
            Ok(Arc::new(store))
        }
        StoreDriver::Rest => {
            let store = RestStore::new(&config.url, &config.api_key)?;
            tracing::info!(url = %config.url, "Using hosted REST store");
            Ok(Arc::new(store))
        }
    }
}

/// Create an empty in-memory store for tests
pub fn create_test_store() -> DynStore {
    Arc::new(MemoryStore::new())
}

/// Serialize a model into a row
pub fn to_row<T: Serialize>(value: &T) -> Result<Row, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Decode(format!("expected an object, got {other}"))),
    }
}

/// Deserialize rows into models
pub fn from_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, StoreError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(Value::Object(row)).map_err(StoreError::from))
        .collect()
}

/// Deserialize the first row, failing with `NotFound` when there is none
pub fn first_row<T: DeserializeOwned>(rows: Vec<Row>, what: &str) -> Result<T, StoreError> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::NotFound(what.to_string()))?;
    Ok(serde_json::from_value(Value::Object(row))?)
}
