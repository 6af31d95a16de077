//! Church records query service.
//!
//! Loads the datastore snapshot and serves the console's read-only REST API.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use church_records::config::Config;
use church_records::store::RecordStore;
use church_records::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(config.log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.log_json).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting church records service");
    tracing::info!("Data path: {:?}", config.data_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!(
        "Page limit: {} (max {}), top-N: {}",
        config.default_page_limit,
        config.max_page_limit,
        config.default_top_n
    );

    // Load record snapshot
    let store = Arc::new(RecordStore::load(&config.data_path).await?);

    // Create application state
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
