//! Impact assessment and chart handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::impact::assess;
use crate::models::ImpactAssessment;
use crate::render::{self, RasterSurface, CHART_SIZE_RANGE};
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct ChartParams {
    pub size: Option<u32>,
}

/// Impact assessment for a dataset
pub async fn get_impact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ImpactAssessment>> {
    let assessment = assess(state.catalog.as_ref(), &state.estimator, &id).await?;
    Ok(Json(assessment))
}

/// Radial chart of a dataset's impact as PNG
pub async fn dataset_chart(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ChartParams>,
) -> AppResult<Response> {
    let size = chart_size(&state, params.size)?;
    let assessment = assess(state.catalog.as_ref(), &state.estimator, &id).await?;
    Ok(chart_response(&assessment, size))
}

/// Render a caller-supplied assessment as PNG
pub async fn render_chart(
    State(state): State<AppState>,
    Query(params): Query<ChartParams>,
    Json(assessment): Json<ImpactAssessment>,
) -> AppResult<Response> {
    let size = chart_size(&state, params.size)?;
    assessment.validate()?;
    Ok(chart_response(&assessment, size))
}

fn chart_size(state: &AppState, requested: Option<u32>) -> AppResult<u32> {
    let size = requested.unwrap_or(state.config.chart_size);
    if !CHART_SIZE_RANGE.contains(&size) {
        return Err(AppError::ValidationError(format!(
            "chart size must be between {} and {}",
            CHART_SIZE_RANGE.start(),
            CHART_SIZE_RANGE.end()
        )));
    }
    Ok(size)
}

fn chart_response(assessment: &ImpactAssessment, size: u32) -> Response {
    let mut surface = RasterSurface::new(size, size);
    render::render(Some(&mut surface), assessment);

    match surface.encode_png() {
        Ok(png) => (
            [
                (header::CONTENT_TYPE, "image/png"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            png,
        )
            .into_response(),
        Err(e) => {
            // no image rather than an error
            tracing::warn!("Chart encoding failed: {}", e);
            StatusCode::NO_CONTENT.into_response()
        }
    }
}
