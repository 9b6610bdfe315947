//! Dataset browsing handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::catalog::{self, CatalogQuery, SortOrder};
use crate::middleware::auth::MaybeUser;
use crate::models::DatasetView;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    /// Comma separated; a dataset must carry all of them
    pub tags: Option<String>,
    pub sort: Option<SortOrder>,
    pub limit: Option<usize>,
}

impl ListParams {
    fn into_query(self) -> CatalogQuery {
        let tags = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        CatalogQuery {
            search: self.search.filter(|s| !s.trim().is_empty()),
            tags,
            sort: self.sort,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TagParams {
    pub q: Option<String>,
}

/// List datasets
pub async fn list(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<DatasetView>>> {
    let query = params.into_query();
    let datasets = state.catalog.list(&query).await?;

    let views = datasets
        .iter()
        .map(|d| {
            let followed = user
                .as_ref()
                .is_some_and(|u| state.store.follows.is_following(u.user.id, &d.id));
            d.to_view(followed)
        })
        .collect();

    Ok(Json(views))
}

/// Get dataset details
pub async fn get(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
) -> AppResult<Json<DatasetView>> {
    let dataset = state.catalog
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Dataset not found".to_string()))?;

    let followed = user
        .as_ref()
        .is_some_and(|u| state.store.follows.is_following(u.user.id, &dataset.id));

    Ok(Json(dataset.to_view(followed)))
}

/// List distinct tags
pub async fn tags(
    State(state): State<AppState>,
    Query(params): Query<TagParams>,
) -> AppResult<Json<Vec<String>>> {
    let tags = catalog::tags(state.catalog.as_ref(), params.q.as_deref()).await?;
    Ok(Json(tags))
}
