//! Follow list handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::catalog::CatalogQuery;
use crate::middleware::auth::UserContext;
use crate::models::{DatasetView, User};
use crate::{AppError, AppResult, AppState};

/// Datasets shown in the "recent" dashboard panel
const RECENT_COUNT: usize = 3;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub user: User,
    pub followed: Vec<DatasetView>,
    pub recent: Vec<DatasetView>,
}

/// Follow a dataset
pub async fn follow(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if state.catalog.get(&id).await?.is_none() {
        return Err(AppError::NotFound("Dataset not found".to_string()));
    }

    state.store.follows.follow(user.user.id, &id)?;
    tracing::info!("{} followed {}", user.user.email, id);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Followed" })),
    ))
}

/// Unfollow a dataset
pub async fn unfollow(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.store.follows.unfollow(user.user.id, &id)?;
    tracing::info!("{} unfollowed {}", user.user.email, id);
    Ok(StatusCode::NO_CONTENT)
}

/// Datasets the caller follows, in follow order
pub async fn list(
    State(state): State<AppState>,
    user: UserContext,
) -> AppResult<Json<Vec<DatasetView>>> {
    Ok(Json(followed_views(&state, &user).await?))
}

/// Followed datasets plus a few recent catalog entries
pub async fn dashboard(
    State(state): State<AppState>,
    user: UserContext,
) -> AppResult<Json<Dashboard>> {
    let followed = followed_views(&state, &user).await?;

    let query = CatalogQuery {
        limit: Some(RECENT_COUNT),
        ..Default::default()
    };
    let recent = state.catalog
        .list(&query)
        .await?
        .iter()
        .map(|d| d.to_view(state.store.follows.is_following(user.user.id, &d.id)))
        .collect();

    Ok(Json(Dashboard {
        user: user.user,
        followed,
        recent,
    }))
}

async fn followed_views(state: &AppState, user: &UserContext) -> AppResult<Vec<DatasetView>> {
    let mut views = Vec::new();
    for id in state.store.follows.list(user.user.id) {
        match state.catalog.get(&id).await? {
            Some(dataset) => views.push(dataset.to_view(true)),
            None => tracing::debug!("Followed dataset {} no longer in catalog", id),
        }
    }
    Ok(views)
}
