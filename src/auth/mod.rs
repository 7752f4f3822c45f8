//! Auth collaborator
//!
//! Resolves a session token to the signed-in visitor. Sign-in itself
//! happens on the hosted backend; this site only reads the token the
//! backend issued, from the `Authorization: Bearer` header or the
//! `session` cookie.

use crate::config::{AuthConfig, AuthDriver, StoreConfig};
use crate::models::AuthUser;
use async_trait::async_trait;
use axum::http::{header, HeaderMap, StatusCode};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Shared auth handle
pub type DynAuth = Arc<dyn AuthProvider>;

/// Auth error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Auth request failed: {0}")]
    Request(String),

    #[error("Auth backend returned status {0}")]
    Backend(u16),
}

/// Resolves session tokens to users
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The user behind `token`, or `None` when the token is unknown or expired
    async fn current_user(&self, token: &str) -> Result<Option<AuthUser>, AuthError>;
}

/// Token table from configuration, for development and tests
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    tokens: HashMap<String, String>,
}

impl StaticAuth {
    /// `tokens` maps a session token to a user id
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn current_user(&self, token: &str) -> Result<Option<AuthUser>, AuthError> {
        Ok(self.tokens.get(token).map(AuthUser::new))
    }
}

/// Hosted backend's `/auth/v1/user` endpoint
pub struct RestAuth {
    client: Client,
    user_url: String,
    api_key: String,
}

impl RestAuth {
    pub fn new(url: &str, api_key: &str) -> Result<Self, AuthError> {
        let client = Client::builder()
            .user_agent("galin-site")
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| AuthError::Request(e.to_string()))?;
        Ok(Self {
            client,
            user_url: format!("{}/auth/v1/user", url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl AuthProvider for RestAuth {
    async fn current_user(&self, token: &str) -> Result<Option<AuthUser>, AuthError> {
        let response = self
            .client
            .get(&self.user_url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status if status.is_success() => {
                let user = response
                    .json::<AuthUser>()
                    .await
                    .map_err(|e| AuthError::Request(e.to_string()))?;
                Ok(Some(user))
            }
            status => Err(AuthError::Backend(status.as_u16())),
        }
    }
}

/// Create the auth provider selected by configuration
pub fn create_auth(auth: &AuthConfig, store: &StoreConfig) -> Result<DynAuth, AuthError> {
    match auth.driver {
        AuthDriver::Static => {
            tracing::info!(tokens = auth.tokens.len(), "Using static session tokens");
            Ok(Arc::new(StaticAuth::new(auth.tokens.clone())))
        }
        AuthDriver::Rest => {
            tracing::info!(url = %store.url, "Using hosted auth");
            Ok(Arc::new(RestAuth::new(&store.url, &store.api_key)?))
        }
    }
}

/// Extract the session token: bearer header first, then the `session` cookie
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                let token = token.trim();
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    for cookie_header in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(token) = cookie.strip_prefix("session=") {
                    if !token.is_empty() {
                        return Some(token.to_string());
                    }
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use proptest::prelude::*;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_bearer_token_wins_over_cookie() {
        let map = headers(&[
            (header::AUTHORIZATION, "Bearer abc"),
            (header::COOKIE, "session=def"),
        ]);
        assert_eq!(extract_session_token(&map).as_deref(), Some("abc"));
    }

    #[test]
    fn test_session_cookie_among_others() {
        let map = headers(&[(header::COOKIE, "theme=dark; session=xyz; lang=en")]);
        assert_eq!(extract_session_token(&map).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_no_token() {
        let map = headers(&[
            (header::AUTHORIZATION, "Basic dXNlcjpwYXNz"),
            (header::COOKIE, "session="),
        ]);
        assert!(extract_session_token(&map).is_none());
    }

    #[tokio::test]
    async fn test_static_auth_lookup() {
        let mut tokens = HashMap::new();
        tokens.insert("dev-token".to_string(), "user-1".to_string());
        let auth = StaticAuth::new(tokens);

        let user = auth.current_user("dev-token").await.unwrap().unwrap();
        assert_eq!(user.id, "user-1");
        assert!(auth.current_user("other").await.unwrap().is_none());
    }

    #[test]
    fn test_create_auth_static_by_default() {
        let auth = create_auth(&AuthConfig::default(), &StoreConfig::default());
        assert!(auth.is_ok());
    }

    proptest! {
        #[test]
        fn property_cookie_token_roundtrip(token in "[A-Za-z0-9._-]{1,64}") {
            let map = headers(&[(header::COOKIE, &format!("a=1; session={token}"))]);
            prop_assert_eq!(extract_session_token(&map), Some(token));
        }
    }
}
