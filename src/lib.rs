use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config {
    pub mod app_config;
}
pub mod handlers {
    pub mod blog_handlers;
    pub mod lead_dtos;
    pub mod lead_handlers;
}
pub mod api {
    pub mod notification_channel;
    pub mod smtp_email;
    pub mod whatsapp_cloud;
}
pub mod models {
    pub mod blog_models;
    pub mod lead_models;
}
pub mod repositories {
    pub mod blog_repository;
}
pub mod utils {
    pub mod lead_dispatcher;
    pub mod lead_templates;
}

use config::app_config::AppConfig;
use handlers::{blog_handlers, lead_handlers};
use repositories::blog_repository::BlogRepository;
use utils::lead_dispatcher::LeadDispatcher;

pub struct AppState {
    pub lead_dispatcher: LeadDispatcher,
    pub blog_repository: Arc<BlogRepository>,
}

async fn health_check() -> &'static str {
    "OK"
}

/// Builds the shared state once at startup: the outbound HTTP client, both
/// notification channels and the blog index.
pub fn build_state(config: &AppConfig) -> anyhow::Result<Arc<AppState>> {
    let http_client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let blog_repository = BlogRepository::load(&config.blog_dir)
        .with_context(|| format!("Failed to load blog posts from {}", config.blog_dir.display()))?;
    tracing::info!(
        "Loaded {} blog posts from {}",
        blog_repository.len(),
        config.blog_dir.display()
    );

    let lead_dispatcher = LeadDispatcher::from_config(config, http_client)
        .context("Failed to build the SMTP transport")?;

    Ok(Arc::new(AppState {
        lead_dispatcher,
        blog_repository: Arc::new(blog_repository),
    }))
}

pub fn create_app(state: Arc<AppState>, static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/lead", post(lead_handlers::submit_lead))
        .route("/api/blog", get(blog_handlers::list_posts))
        .route("/api/blog/slugs", get(blog_handlers::list_slugs))
        .route("/api/blog/{slug}", get(blog_handlers::get_post));

    // The built landing page, if any, is served for every other path
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
    .layer(
        CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_origin(Any)
            .allow_headers([axum::http::header::CONTENT_TYPE])
            .expose_headers([axum::http::header::CONTENT_TYPE]),
    )
    .with_state(state)
}
