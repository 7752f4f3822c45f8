//! Galin Education site server

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use galin_site::{
    api::{self, AppState},
    auth::create_auth,
    config::Config,
    services::{BlogService, ContactService, EventService, TeamService},
    store::{
        create_store, DataStore,
        repositories::{StoreBlogRepository, StoreEventRepository, StoreTeamRepository},
    },
    theme::ThemeEngine,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "galin_site=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Galin site...");

    // Load configuration
    let config = Arc::new(Config::load_with_env(Path::new("config.yml"))?);
    tracing::info!("Configuration loaded");

    // External collaborators
    let store = create_store(&config.store)?;
    let auth = create_auth(&config.auth, &config.store)?;
    tracing::info!(driver = store.driver(), "Data store ready");

    // Initialize services
    let blog_service = Arc::new(BlogService::new(StoreBlogRepository::boxed(store.clone())));
    let event_service = Arc::new(EventService::new(StoreEventRepository::boxed(store.clone())));
    let team_service = Arc::new(TeamService::new(StoreTeamRepository::boxed(store.clone())));
    let contact_service = Arc::new(ContactService::new(&config.contact));

    // Initialize theme engine
    let theme_engine = ThemeEngine::new(config.theme.path.as_deref())?;
    match &config.theme.path {
        Some(path) => tracing::info!("Templates loaded with overrides from {}", path.display()),
        None => tracing::info!("Using embedded templates"),
    }

    if !config.admin.require_auth {
        tracing::warn!("Admin panel is open without a session");
    }

    let state = AppState {
        config: config.clone(),
        blog_service,
        event_service,
        team_service,
        contact_service,
        auth,
        theme_engine: Arc::new(theme_engine),
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
