//! Dataset Explorer
//!
//! Backend for browsing a dataset catalog, assessing each dataset's impact
//! and keeping a personal follow list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     DATASET EXPLORER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  API      │  │  Auth     │  │  Impact Estimator       │ │
//! │  │  (Axum)   │  │  (JWT +   │  │   └─▶ Radial Chart      │ │
//! │  │           │  │  sessions)│  │       (PNG raster)      │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │       ┌──────────────────────────────────┐                 │
//! │       │ Catalog: mock records | hub API  │                 │
//! │       └──────────────────────────────────┘                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod catalog;
pub mod error;
pub mod handlers;
pub mod impact;
pub mod middleware;
pub mod models;
pub mod render;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use catalog::DatasetCatalog;
use config::Config;
use impact::ImpactEstimator;
use store::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub catalog: Arc<dyn DatasetCatalog>,
    pub estimator: ImpactEstimator,
    pub config: Config,
}

impl AppState {
    /// Build state from configuration
    pub fn new(config: Config) -> AppResult<Self> {
        let catalog = catalog::from_config(&config)?;
        Ok(Self::with_catalog(config, catalog))
    }

    pub fn with_catalog(config: Config, catalog: Arc<dyn DatasetCatalog>) -> Self {
        Self {
            store: Store::default(),
            catalog,
            estimator: ImpactEstimator::new(config.impact_scoring),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/auth/sign-up", post(handlers::auth::sign_up))
        .route("/api/v1/auth/sign-in", post(handlers::auth::sign_in))
        .route("/api/v1/tags", get(handlers::datasets::tags))
        .route("/api/v1/impact/chart", post(handlers::impact::render_chart));

    // Catalog routes (token optional, personalizes is_followed)
    let catalog_routes = Router::new()
        .route("/api/v1/datasets", get(handlers::datasets::list))
        .route("/api/v1/datasets/:id", get(handlers::datasets::get))
        .route("/api/v1/datasets/:id/impact", get(handlers::impact::get_impact))
        .route("/api/v1/datasets/:id/impact/chart", get(handlers::impact::dataset_chart))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::optional_user_auth
        ));

    // User routes (session token auth)
    let user_routes = Router::new()
        .route("/api/v1/auth/sign-out", post(handlers::auth::sign_out))
        .route("/api/v1/users/me", get(handlers::auth::me))
        .route("/api/v1/users/me/follows", get(handlers::follows::list))
        .route("/api/v1/users/me/dashboard", get(handlers::follows::dashboard))
        .route(
            "/api/v1/datasets/:id/follow",
            post(handlers::follows::follow).delete(handlers::follows::unfollow),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_user_auth
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(catalog_routes)
        .merge(user_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
