//! Dataset Explorer server binary

use dataset_explorer::{catalog, config::Config, create_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let json = std::env::var("LOG_FORMAT").map(|f| f == "json").unwrap_or(false);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "dataset_explorer=debug,tower_http=debug".into()))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    // Load configuration
    let config = Config::from_env();
    if config.is_production() && config.uses_default_secret() {
        anyhow::bail!("JWT_SECRET must be set in production");
    }

    tracing::info!("Dataset Explorer starting...");
    tracing::info!(
        "Catalog: {:?}, scoring: {:?}, environment: {}",
        config.catalog_source,
        config.impact_scoring,
        config.environment
    );

    // Build application state
    let catalog = catalog::from_config(&config)?;
    let state = AppState::with_catalog(config.clone(), catalog);

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
