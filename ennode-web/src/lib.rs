//! ennode-web library - site backend for the Visual Ennode website
//!
//! Serves each page's loader data as JSON, backed by the public content API,
//! and forwards the contact and CV forms to the mail endpoints.

use axum::Router;
use ennode_common::config::SiteConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod client;
pub mod error;

use client::{ApiClient, ClientError};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Backend content API client (pooled connections)
    pub client: Arc<ApiClient>,
    /// Resolved site configuration
    pub config: Arc<SiteConfig>,
}

impl AppState {
    /// Create application state with a client built from `config`
    pub fn new(config: SiteConfig) -> Result<Self, ClientError> {
        let client = ApiClient::from_config(&config)?;
        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
        })
    }
}

/// Page and form routes, relative to their `/api` or `/api/:locale` mount
fn site_routes(max_upload_bytes: usize) -> Router<AppState> {
    use axum::extract::DefaultBodyLimit;
    use axum::routing::{get, post};

    let pages = Router::new()
        .route("/layout", get(api::get_layout))
        .route("/home", get(api::get_home))
        .route("/about", get(api::get_about))
        .route("/platforms", get(api::get_platforms))
        .route("/works", get(api::get_works_index))
        .route("/works/:category", get(api::get_works_by_category))
        .route("/works/:category/:work", get(api::get_work_detail))
        .route("/news", get(api::get_news_list))
        .route("/news/:slug", get(api::get_news));

    let actions = Router::new()
        .route("/contact", post(api::send_contact))
        .route(
            "/careers/cv",
            post(api::send_cv).layer(DefaultBodyLimit::max(max_upload_bytes)),
        );

    pages.merge(actions)
}

/// Build application router
///
/// Every site route is served both with an explicit locale segment and
/// without one, in which case the configured default locale applies.
pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .nest("/api/:locale", site_routes(max_upload_bytes))
        .nest("/api", site_routes(max_upload_bytes))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
