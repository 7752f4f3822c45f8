//! API layer - HTTP handlers and routing
//!
//! Server-rendered HTML for the public site and the admin panel:
//! - Marketing pages (home, services, story, results, team, careers, login)
//! - Contact form
//! - Blog list and post pages
//! - Events page with calendar and registration
//! - Admin editors for blog, events and team
//! - Embedded static assets

pub mod admin;
pub mod blog;
pub mod contact;
pub mod events;
pub mod middleware;
pub mod pages;
pub mod responses;
pub mod static_files;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use middleware::{AppState, CurrentUser, WebError};

/// Public routes
pub fn build_site_router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/services/{slug}", get(pages::service))
        .route("/about/story", get(pages::story))
        .route("/about/story/results", get(pages::results))
        .route("/about/team", get(pages::team))
        .route("/careers", get(pages::careers))
        .route("/login", get(pages::login))
        .route("/contact", get(contact::show).post(contact::submit))
        .route("/resources/blog", get(blog::list))
        .route("/resources/blog/{id}", get(blog::post))
        .route("/resources/events", get(events::list))
        .route("/resources/events/{id}/register", post(events::register))
        .route("/static/{*path}", get(static_files::serve_static))
        .route("/health", get(|| async { "OK" }))
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);
    match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(e) => tracing::warn!("Ignoring invalid CORS origin '{}': {}", cors_origin, e),
    }

    Router::new()
        .merge(build_site_router())
        .merge(admin::router(state.clone()))
        .fallback(static_files::fallback)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::render_error_pages,
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticAuth;
    use crate::config::Config;
    use crate::services::{BlogService, ContactService, EventService, TeamService};
    use crate::store::repositories::{
        StoreBlogRepository, StoreEventRepository, StoreTeamRepository,
    };
    use crate::store::{DataStore, DynStore, Filter, MemoryStore, Query, Row, StoreError};
    use crate::theme::ThemeEngine;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    const TOKEN: &str = "test-token";

    /// Demo store whose inserts fail as the hosted backend would when down
    struct FailingInserts(MemoryStore);

    #[async_trait::async_trait]
    impl DataStore for FailingInserts {
        async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, StoreError> {
            self.0.select(table, query).await
        }

        async fn insert(&self, _table: &str, _rows: Vec<Row>) -> Result<Vec<Row>, StoreError> {
            Err(StoreError::Backend {
                status: 503,
                message: "store unavailable".to_string(),
            })
        }

        async fn update(
            &self,
            table: &str,
            filters: &[Filter],
            patch: Row,
        ) -> Result<Vec<Row>, StoreError> {
            self.0.update(table, filters, patch).await
        }

        async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError> {
            self.0.delete(table, filters).await
        }

        async fn count(&self, table: &str, filters: &[Filter]) -> Result<u64, StoreError> {
            self.0.count(table, filters).await
        }

        fn driver(&self) -> &'static str {
            "failing"
        }
    }

    fn test_state(store: DynStore) -> AppState {
        let mut config = Config::default();
        config.contact.submit_delay_ms = 0;
        config.admin.require_auth = true;

        let mut tokens = HashMap::new();
        tokens.insert(TOKEN.to_string(), "user-1".to_string());

        AppState {
            blog_service: Arc::new(BlogService::new(StoreBlogRepository::boxed(store.clone()))),
            event_service: Arc::new(EventService::new(StoreEventRepository::boxed(store.clone()))),
            team_service: Arc::new(TeamService::new(StoreTeamRepository::boxed(store))),
            contact_service: Arc::new(ContactService::new(&config.contact)),
            auth: Arc::new(StaticAuth::new(tokens)),
            theme_engine: Arc::new(ThemeEngine::new(None).unwrap()),
            config: Arc::new(config),
        }
    }

    fn app() -> (Router, DynStore) {
        let store: DynStore = Arc::new(MemoryStore::with_demo_data());
        (build_router(test_state(store.clone()), "http://localhost:8080"), store)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response: Response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("session={token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn admin_get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_public_pages_render() {
        let (app, _) = app();
        for uri in [
            "/",
            "/services/test-prep",
            "/about/story",
            "/about/story/results",
            "/about/team",
            "/careers",
            "/login",
            "/contact",
            "/resources/blog",
            "/resources/blog/post-essay",
            "/resources/events",
            "/static/site.css",
            "/health",
        ] {
            let (status, _) = send(&app, get(uri)).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_unknown_pages_are_themed_404s() {
        let (app, _) = app();
        let (status, body) = send(&app, get("/no/such/page")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
        assert!(body.contains("site-header"));

        let (status, _) = send(&app, get("/services/astrology")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_contact_requires_name() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            post_form("/contact", "name=&email=foo%40bar.com&phone=555", None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Name is required"));
        assert!(!body.contains("Thank You!"));
    }

    #[tokio::test]
    async fn test_contact_email_validation() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            post_form("/contact", "name=Jamie&email=foo&phone=555", None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Email is invalid"));
        assert!(body.contains("value=\"Jamie\""));

        let (status, body) = send(
            &app,
            post_form("/contact", "name=Jamie&email=foo%40bar.com&phone=555", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Thank You!"));
        assert!(body.contains("http-equiv=\"refresh\""));
        assert!(!body.contains("value=\"Jamie\""));
        assert!(!body.contains("Send Message"));
    }

    #[tokio::test]
    async fn test_results_carousel_wraps() {
        let (app, _) = app();
        let (_, body) = send(&app, get("/about/story/results?t=3")).await;
        assert!(body.contains("David R."));
        assert!(body.contains("?t=0&amp;d=1"));
        assert!(body.contains("?t=2&amp;d=-1"));
        assert!(body.contains("?t=0&amp;d=-3"));
        assert!(body.contains("enter-none"));

        assert!(body.contains("data-swipe-threshold=\"10000"));

        let (_, body) = send(&app, get("/about/story/results?t=1&d=-2")).await;
        assert!(body.contains("enter-left"));

        let (_, body) = send(&app, get("/about/story/results?t=4")).await;
        assert!(body.contains("Sarah J."));

        let (_, body) = send(&app, get("/about/story/results?t=-1")).await;
        assert!(body.contains("David R."));
    }

    #[tokio::test]
    async fn test_calendar_empty_date() {
        let (app, _) = app();
        let (status, body) = send(&app, get("/resources/events?date=2001-01-01")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("January 2001"));
        assert!(body.contains("No events scheduled for this date."));
    }

    #[tokio::test]
    async fn test_sold_out_event_disables_registration() {
        let (app, _) = app();
        let (_, body) = send(&app, get("/resources/events")).await;
        assert!(body.contains("Family Info Session"));
        assert!(body.contains("Sold Out"));
        assert!(body.contains("disabled"));
        assert!(body.contains("Register Now"));
    }

    #[tokio::test]
    async fn test_registration_flow() {
        let (app, store) = app();

        let (status, body) = send(
            &app,
            post_form("/resources/events/event-essay-workshop/register", "", None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Please log in to register for events"));

        let (status, body) = send(
            &app,
            post_form("/resources/events/event-essay-workshop/register", "", Some(TOKEN)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Registration successful!"));

        let (_, body) = send(
            &app,
            post_form("/resources/events/event-test-strategy/register", "", Some(TOKEN)),
        )
        .await;
        assert!(body.contains("redirected to payment processing"));

        let (status, body) = send(
            &app,
            post_form("/resources/events/event-info-night/register", "", Some(TOKEN)),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.contains("Event is full"));

        let count = store
            .count(
                crate::store::tables::EVENT_REGISTRATIONS,
                &[crate::store::Filter::eq("user_id", "user-1")],
            )
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_blog_filters() {
        let (app, _) = app();
        let (_, body) = send(&app, get("/resources/blog?tag=tag-sat")).await;
        assert!(body.contains("SAT vs ACT"));
        assert!(!body.contains("Five Habits"));

        let (_, body) = send(&app, get("/resources/blog?q=HABITS")).await;
        assert!(body.contains("Five Habits"));
        assert!(!body.contains("SAT vs ACT"));

        let (_, body) = send(&app, get("/resources/blog?q=zebra")).await;
        assert!(body.contains("No posts found"));
    }

    #[tokio::test]
    async fn test_blog_post_markdown_and_missing() {
        let (app, _) = app();
        let (_, body) = send(&app, get("/resources/blog/post-essay")).await;
        assert!(body.contains("<h1>Start with a story</h1>"));
        assert!(body.contains("<strong>specific moment</strong>"));

        let (status, body) = send(&app, get("/resources/blog/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Post not found"));
    }

    #[tokio::test]
    async fn test_team_category_filter() {
        let (app, _) = app();
        let (_, body) = send(&app, get("/about/team?category=tutor")).await;
        assert!(body.contains("Director of Test Prep"));
        assert!(!body.contains("Director of College Counseling"));

        let (_, body) = send(&app, get("/about/team?category=coach")).await;
        assert!(body.contains("No team members found in this category."));
    }

    #[tokio::test]
    async fn test_admin_requires_session() {
        let (app, _) = app();
        let (status, body) = send(&app, get("/admin/blog")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Please log in to access the admin panel"));

        let (status, _) = send(&app, admin_get("/admin/blog")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_admin_post_without_title_is_rejected() {
        let (app, store) = app();
        let before = store.count(crate::store::tables::BLOG_POSTS, &[]).await.unwrap();

        let (status, body) = send(
            &app,
            post_form(
                "/admin/blog/posts",
                "title=&preview=p&content=c&image_url=i&author_id=author-sarah",
                Some(TOKEN),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Validation Error"));
        assert!(body.contains("Title is required"));

        let after = store.count(crate::store::tables::BLOG_POSTS, &[]).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_admin_creates_post_with_tags() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            post_form(
                "/admin/blog/posts",
                "title=Summer+Reading&preview=Books&content=%23+Hi&image_url=https%3A%2F%2Fx.test%2Fa.png\
                 &author_id=author-michael&tag_ids=tag-essays&tag_ids=tag-act",
                Some(TOKEN),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Post created"));

        let (_, body) = send(&app, get("/resources/blog?tag=tag-act")).await;
        assert!(body.contains("Summer Reading"));
        assert!(body.contains("SAT vs ACT"));
    }

    #[tokio::test]
    async fn test_admin_event_validation_and_save() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            post_form("/admin/events", "title=Open+House&date=&time=&location=", Some(TOKEN)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Date is required"));
        assert!(body.contains("value=\"Open House\""));

        let (status, body) = send(
            &app,
            post_form(
                "/admin/events",
                "title=Open+House&date=2030-05-01&time=6pm&location=Madison&type=seminar&price=0&max_participants=",
                Some(TOKEN),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Event created"));
        assert!(body.contains("Open House"));
    }

    #[tokio::test]
    async fn test_admin_team_degree_editing() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            post_form(
                "/admin/team",
                "name=Lisa&title=Coach&category=coach&degrees=B.A.&action=add_degree&new_degree=M.Ed.",
                Some(TOKEN),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("value=\"B.A.\""));
        assert!(body.contains("value=\"M.Ed.\""));

        let (_, body) = send(
            &app,
            post_form(
                "/admin/team",
                "name=Lisa&title=Coach&category=coach&degrees=B.A.&degrees=M.Ed.&action=remove_degree%3A0",
                Some(TOKEN),
            ),
        )
        .await;
        assert!(!body.contains("value=\"B.A.\""));
        assert!(body.contains("value=\"M.Ed.\""));

        let (status, body) = send(
            &app,
            post_form("/admin/team", "name=&title=Coach&action=save", Some(TOKEN)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Name is required"));
    }

    #[tokio::test]
    async fn test_admin_delete_event() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            post_form("/admin/events/event-fall-kickoff/delete", "", Some(TOKEN)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Event deleted"));
        assert!(!body.contains("Application Season Kickoff"));
    }

    #[tokio::test]
    async fn test_header_carries_script_settings() {
        let (app, _) = app();
        let (_, body) = send(&app, get("/")).await;
        assert!(body.contains("data-close-delay=\"300\""));
        assert!(body.contains("data-scroll-threshold=\"10"));
    }

    #[tokio::test]
    async fn test_broken_templates_fall_back_to_plain_page() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("home.html"), "{{ missing }}").unwrap();
        std::fs::write(dir.path().join("error.html"), "{{ missing }}").unwrap();

        let mut state = test_state(Arc::new(MemoryStore::with_demo_data()));
        state.theme_engine = Arc::new(ThemeEngine::new(Some(dir.path())).unwrap());
        let app = build_router(state, "http://localhost:8080");

        let (status, body) = send(&app, get("/")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("The page could not be rendered"));
        assert!(body.contains("<!DOCTYPE html>"));
        assert!(!body.contains("site-header"));
    }

    #[tokio::test]
    async fn test_store_failure_on_post_save_keeps_form() {
        let store: DynStore = Arc::new(FailingInserts(MemoryStore::with_demo_data()));
        let app = build_router(test_state(store.clone()), "http://localhost:8080");
        let before = store.count(crate::store::tables::BLOG_POSTS, &[]).await.unwrap();

        let (status, body) = send(
            &app,
            post_form(
                "/admin/blog/posts",
                "title=Summer+Reading&preview=Books&content=Read&image_url=img\
                 &author_id=author-michael",
                Some(TOKEN),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("toast-destructive"));
        assert!(body.contains("Failed to save post: store unavailable"));
        assert!(body.contains("value=\"Summer Reading\""));

        let after = store.count(crate::store::tables::BLOG_POSTS, &[]).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_store_failure_on_registration() {
        let store: DynStore = Arc::new(FailingInserts(MemoryStore::with_demo_data()));
        let app = build_router(test_state(store.clone()), "http://localhost:8080");

        let (status, body) = send(
            &app,
            post_form("/resources/events/event-essay-workshop/register", "", Some(TOKEN)),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("toast-destructive"));
        assert!(body.contains("store unavailable"));
        assert!(!body.contains("Registration successful!"));

        let count = store
            .count(
                crate::store::tables::EVENT_REGISTRATIONS,
                &[Filter::eq("user_id", "user-1")],
            )
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_unparseable_degree_removal_does_not_save() {
        let (app, store) = app();
        let before = store.count(crate::store::tables::TEAM_MEMBERS, &[]).await.unwrap();

        let (status, body) = send(
            &app,
            post_form(
                "/admin/team",
                "name=Lisa&title=Coach&category=coach&degrees=B.A.&action=remove_degree%3Afirst",
                Some(TOKEN),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("value=\"B.A.\""));
        assert!(!body.contains("Team member created"));

        let after = store.count(crate::store::tables::TEAM_MEMBERS, &[]).await.unwrap();
        assert_eq!(before, after);
    }
}
