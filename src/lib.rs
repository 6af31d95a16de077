//! Church records query service.
//!
//! Serves the administration console's list, detail and dashboard views from
//! a read-only snapshot of member, family, offering and prayer records.

pub mod api;
pub mod config;
pub mod errors;
pub mod format;
pub mod models;
pub mod query;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use query::Page;
use store::RecordStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Resolve `skip`/`limit` request parameters against the configured limits.
    pub fn page(&self, skip: Option<usize>, limit: Option<usize>) -> Page {
        Page::new(
            skip,
            limit,
            self.config.default_page_limit,
            self.config.max_page_limit,
        )
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Datastore
        .route("/datastore/revision", get(api::get_revision))
        // Dashboard
        .route("/dashboard/statistics", get(api::get_dashboard_statistics))
        // Members
        .route("/members", get(api::list_members))
        .route("/members/statistics", get(api::get_member_statistics))
        .route("/members/{id}", get(api::get_member))
        .route(
            "/members/{id}/offerings/summary",
            get(api::get_member_offering_summary),
        )
        // Families
        .route("/families", get(api::list_families))
        .route("/families/statistics", get(api::get_family_statistics))
        .route("/families/{id}", get(api::get_family))
        // Offerings
        .route("/offerings", get(api::list_offerings))
        .route("/offerings/statistics", get(api::get_offering_statistics))
        .route("/offerings/{id}", get(api::get_offering))
        // Prayers
        .route("/prayers", get(api::list_prayers))
        .route("/prayers/statistics", get(api::get_prayer_statistics))
        .route("/prayers/{id}", get(api::get_prayer));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
