//! In-process store
//!
//! Tables live in a `RwLock<HashMap<table, Vec<Row>>>`. The store assigns
//! UUID ids and RFC 3339 timestamps on insert, and removes dependent join
//! rows when a post, tag or event is deleted, the same way the hosted
//! backend's foreign keys cascade.

use super::{tables, DataStore, Filter, Query, Row, StoreError};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Tables that carry `created_at` / `updated_at` columns
const TIMESTAMPED: [&str; 6] = [
    tables::BLOG_POSTS,
    tables::BLOG_AUTHORS,
    tables::BLOG_TAGS,
    tables::EVENTS,
    tables::EVENT_REGISTRATIONS,
    tables::TEAM_MEMBERS,
];

/// Dependent rows removed with their parent: (parent table, child table, child column)
const CASCADES: [(&str, &str, &str); 3] = [
    (tables::BLOG_POSTS, tables::BLOG_POSTS_TAGS, "post_id"),
    (tables::BLOG_TAGS, tables::BLOG_POSTS_TAGS, "tag_id"),
    (tables::EVENTS, tables::EVENT_REGISTRATIONS, "event_id"),
];

/// In-memory `DataStore`
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with the demo site content
    pub fn with_demo_data() -> Self {
        Self::with_tables(super::seed::demo_tables(Utc::now().date_naive()))
    }

    /// Create a store from ready-made tables
    pub fn with_tables(tables: HashMap<String, Vec<Row>>) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn matches_all(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|f| f.matches(row))
}

/// Order two JSON values; nulls sort last
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Row> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_all(row, &query.filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, StoreError> {
        let timestamped = TIMESTAMPED.contains(&table);
        let mut tables = self.tables.write().await;
        let target = tables.entry(table.to_string()).or_default();

        let mut inserted = Vec::with_capacity(rows.len());
        for mut row in rows {
            if !matches!(row.get("id"), Some(Value::String(_))) {
                row.insert("id".to_string(), Value::String(uuid::Uuid::new_v4().to_string()));
            }
            if timestamped {
                let now = now_timestamp();
                row.entry("created_at").or_insert_with(|| Value::String(now.clone()));
                row.entry("updated_at").or_insert_with(|| Value::String(now));
            }
            target.push(row.clone());
            inserted.push(row);
        }
        tracing::debug!(table, count = inserted.len(), "memory store insert");
        Ok(inserted)
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Row,
    ) -> Result<Vec<Row>, StoreError> {
        let mut tables = self.tables.write().await;
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| matches_all(row, filters)) {
                for (key, value) in &patch {
                    if key != "id" {
                        row.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let mut removed_ids = Vec::new();
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| {
                if matches_all(row, filters) {
                    if let Some(Value::String(id)) = row.get("id") {
                        removed_ids.push(id.clone());
                    }
                    false
                } else {
                    true
                }
            });
        }

        for (parent, child, column) in CASCADES {
            if parent != table || removed_ids.is_empty() {
                continue;
            }
            if let Some(rows) = tables.get_mut(child) {
                rows.retain(|row| match row.get(column) {
                    Some(Value::String(id)) => !removed_ids.contains(id),
                    _ => true,
                });
            }
        }
        Ok(())
    }

    async fn count(&self, table: &str, filters: &[Filter]) -> Result<u64, StoreError> {
        let tables = self.tables.read().await;
        let count = tables
            .get(table)
            .map(|rows| rows.iter().filter(|row| matches_all(row, filters)).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    fn driver(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let store = MemoryStore::new();
        let inserted = store
            .insert(tables::BLOG_TAGS, vec![row(json!({"name": "SAT"}))])
            .await
            .unwrap();

        assert_eq!(inserted.len(), 1);
        assert!(inserted[0]["id"].as_str().is_some());
        assert!(inserted[0].contains_key("created_at"));
        assert!(inserted[0].contains_key("updated_at"));
    }

    #[tokio::test]
    async fn test_join_table_has_no_timestamps() {
        let store = MemoryStore::new();
        let inserted = store
            .insert(
                tables::BLOG_POSTS_TAGS,
                vec![row(json!({"post_id": "p1", "tag_id": "t1"}))],
            )
            .await
            .unwrap();
        assert!(!inserted[0].contains_key("created_at"));
    }

    #[tokio::test]
    async fn test_select_filters_and_orders() {
        let store = MemoryStore::new();
        store
            .insert(
                tables::TEAM_MEMBERS,
                vec![
                    row(json!({"name": "Zed", "category": "coach"})),
                    row(json!({"name": "Amy", "category": "coach"})),
                    row(json!({"name": "Bob", "category": "tutor"})),
                ],
            )
            .await
            .unwrap();

        let rows = store
            .select(
                tables::TEAM_MEMBERS,
                &Query::new().filter("category", "coach").order_by("name", true),
            )
            .await
            .unwrap();
        let names: Vec<_> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Amy", "Zed"]);

        let rows = store
            .select(tables::TEAM_MEMBERS, &Query::new().order_by("name", false).limit(1))
            .await
            .unwrap();
        assert_eq!(rows[0]["name"], "Zed");
    }

    #[tokio::test]
    async fn test_nulls_sort_last() {
        let store = MemoryStore::new();
        store
            .insert(
                tables::EVENTS,
                vec![
                    row(json!({"max_participants": null})),
                    row(json!({"max_participants": 5})),
                    row(json!({"max_participants": 2})),
                ],
            )
            .await
            .unwrap();
        let rows = store
            .select(tables::EVENTS, &Query::new().order_by("max_participants", true))
            .await
            .unwrap();
        assert_eq!(rows[0]["max_participants"], 2);
        assert!(rows[2]["max_participants"].is_null());
    }

    #[tokio::test]
    async fn test_update_patches_matching_rows() {
        let store = MemoryStore::new();
        let inserted = store
            .insert(tables::EVENTS, vec![row(json!({"title": "Old"}))])
            .await
            .unwrap();
        let id = inserted[0]["id"].as_str().unwrap().to_string();

        let updated = store
            .update(
                tables::EVENTS,
                &[Filter::eq("id", id.clone())],
                row(json!({"title": "New", "id": "ignored"})),
            )
            .await
            .unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0]["title"], "New");
        assert_eq!(updated[0]["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_delete_post_cascades_to_links() {
        let store = MemoryStore::new();
        store
            .insert(tables::BLOG_POSTS, vec![row(json!({"id": "p1", "title": "A"}))])
            .await
            .unwrap();
        store
            .insert(
                tables::BLOG_POSTS_TAGS,
                vec![
                    row(json!({"post_id": "p1", "tag_id": "t1"})),
                    row(json!({"post_id": "p2", "tag_id": "t1"})),
                ],
            )
            .await
            .unwrap();

        store
            .delete(tables::BLOG_POSTS, &[Filter::eq("id", "p1")])
            .await
            .unwrap();

        assert_eq!(store.count(tables::BLOG_POSTS, &[]).await.unwrap(), 0);
        assert_eq!(store.count(tables::BLOG_POSTS_TAGS, &[]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_count_with_filter() {
        let store = MemoryStore::new();
        store
            .insert(
                tables::EVENT_REGISTRATIONS,
                vec![
                    row(json!({"event_id": "e1"})),
                    row(json!({"event_id": "e1"})),
                    row(json!({"event_id": "e2"})),
                ],
            )
            .await
            .unwrap();
        let count = store
            .count(tables::EVENT_REGISTRATIONS, &[Filter::eq("event_id", "e1")])
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.count("unknown", &[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_demo_data_is_seeded() {
        let store = MemoryStore::with_demo_data();
        assert!(store.count(tables::BLOG_POSTS, &[]).await.unwrap() > 0);
        assert!(store.count(tables::EVENTS, &[]).await.unwrap() > 0);
        assert_eq!(store.count(tables::TEAM_MEMBERS, &[]).await.unwrap(), 3);
    }
}
