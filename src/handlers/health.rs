//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::impact::ScoringStrategy;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    catalog: &'static str,
    scoring: &'static str,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let scoring = match state.estimator.strategy() {
        ScoringStrategy::Deterministic => "deterministic",
        ScoringStrategy::Random => "random",
    };

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        catalog: state.catalog.name(),
        scoring,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
