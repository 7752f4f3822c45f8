//! Hosted backend store
//!
//! Talks to the backend's PostgREST endpoint at `{url}/rest/v1/{table}`.
//! Every request carries the public API key both as `apikey` and as a
//! bearer token. Filters are encoded as `column=eq.value`, ordering as
//! `order=column.asc|desc`.

use super::{DataStore, Filter, Query, Row, StoreError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

/// `DataStore` backed by the hosted backend's REST API
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// Create a store for the backend at `url`
    pub fn new(url: &str, api_key: &str) -> Result<Self, StoreError> {
        let client = Client::builder()
            .user_agent("galin-site")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::Request(format!("HTTP client error: {e}")))?;
        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, builder: RequestBuilder, table: &str) -> Result<Response, StoreError> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = backend_message(&body)
            .unwrap_or_else(|| format!("{} request failed with status {}", table, status.as_u16()));
        tracing::warn!(table, status = status.as_u16(), %message, "backend request failed");
        Err(StoreError::Backend {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_rows(response: Response) -> Result<Vec<Row>, StoreError> {
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Query-string pairs for a set of filters
pub fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|f| (f.column.clone(), format!("eq.{}", f.value)))
        .collect()
}

/// Query-string pairs for a full select
pub fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    params.extend(filter_params(&query.filters));
    if let Some(order) = &query.order {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

/// Total from a `Content-Range` header such as `0-9/42` or `*/0`
pub fn parse_content_range(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

/// The `message` field of a backend error body
fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error_description"))
        .or_else(|| value.get("msg"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl DataStore for RestStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, StoreError> {
        let builder = self.client.get(self.table_url(table)).query(&query_params(query));
        let response = self.send(builder, table).await?;
        Self::read_rows(response).await
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, StoreError> {
        let builder = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&rows);
        let response = self.send(builder, table).await?;
        Self::read_rows(response).await
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Row,
    ) -> Result<Vec<Row>, StoreError> {
        let builder = self
            .client
            .patch(self.table_url(table))
            .query(&filter_params(filters))
            .header("Prefer", "return=representation")
            .json(&patch);
        let response = self.send(builder, table).await?;
        Self::read_rows(response).await
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError> {
        let builder = self
            .client
            .delete(self.table_url(table))
            .query(&filter_params(filters));
        self.send(builder, table).await?;
        Ok(())
    }

    async fn count(&self, table: &str, filters: &[Filter]) -> Result<u64, StoreError> {
        let mut params = vec![("select".to_string(), "id".to_string())];
        params.extend(filter_params(filters));
        let builder = self
            .client
            .get(self.table_url(table))
            .query(&params)
            .header("Prefer", "count=exact")
            .header("Range-Unit", "items")
            .header("Range", "0-0");
        let response = self.send(builder, table).await?;
        response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range)
            .ok_or_else(|| StoreError::Decode(format!("missing row count for {table}")))
    }

    fn driver(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_encode_filters_order_and_limit() {
        let query = Query::new()
            .filter("event_id", "e1")
            .order_by("created_at", false)
            .limit(5);
        let params = query_params(&query);
        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*".to_string()),
                ("event_id".to_string(), "eq.e1".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_content_range() {
        assert_eq!(parse_content_range("0-0/42"), Some(42));
        assert_eq!(parse_content_range("*/0"), Some(0));
        assert_eq!(parse_content_range("0-9/*"), None);
        assert_eq!(parse_content_range("garbage"), None);
    }

    #[test]
    fn test_backend_message() {
        let body = r#"{"code":"23502","message":"null value in column \"title\""}"#;
        assert_eq!(
            backend_message(body).as_deref(),
            Some("null value in column \"title\"")
        );
        assert_eq!(backend_message("<html>"), None);
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let store = RestStore::new("https://example.supabase.co/", "key").unwrap();
        assert_eq!(
            store.table_url("events"),
            "https://example.supabase.co/rest/v1/events"
        );
    }
}
