//! Public dataset hub backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use super::{CatalogQuery, DatasetCatalog, MAX_LIMIT};
use crate::models::{Dataset, format_bytes};
use crate::{AppError, AppResult};

/// Dataset record as returned by the hub REST API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HubDataset {
    id: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    downloads: Option<u64>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    last_modified: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    card_data: Option<serde_json::Value>,
}

pub struct HubCatalog {
    client: reqwest::Client,
    base_url: Url,
}

impl HubCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::InternalError(format!("hub base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::InternalError(format!("hub base URL {} cannot hold a path", base_url)));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dataset-explorer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::InternalError(format!("hub client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// `{base}/api/datasets/{segments...}`, each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::InternalError("hub base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(["api", "datasets"])
            .extend(segments);
        Ok(url)
    }
}

/// Hub ids are `name` or `owner/name`
fn id_segments(id: &str) -> AppResult<Vec<&str>> {
    let segments: Vec<&str> = id.split('/').collect();
    let valid = segments.len() <= 2
        && segments.iter().all(|s| !s.is_empty() && *s != "." && *s != "..");

    if valid {
        Ok(segments)
    } else {
        Err(AppError::ValidationError(format!("invalid dataset id '{}'", id)))
    }
}

#[async_trait]
impl DatasetCatalog for HubCatalog {
    fn name(&self) -> &'static str {
        "hub"
    }

    async fn list(&self, query: &CatalogQuery) -> AppResult<Vec<Dataset>> {
        let url = self.endpoint(&[])?;

        // tag filter and sort run locally, so they need the widest page
        let fetch = if query.tags.is_empty() && query.sort.is_none() {
            query.limit()
        } else {
            MAX_LIMIT
        };
        let fetch = fetch.to_string();

        let mut params: Vec<(&str, &str)> = vec![("limit", fetch.as_str()), ("full", "true")];
        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("search", search));
        }

        let response = self.client.get(url).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "hub list returned {}",
                response.status()
            )));
        }

        let records: Vec<HubDataset> = response.json().await?;
        tracing::debug!("Hub returned {} datasets", records.len());

        let mut datasets: Vec<Dataset> = records.into_iter().map(to_dataset).collect();
        query.apply(&mut datasets);
        Ok(datasets)
    }

    async fn get(&self, id: &str) -> AppResult<Option<Dataset>> {
        let url = self.endpoint(&id_segments(id)?)?;
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::UNAUTHORIZED => Ok(None),
            status if status.is_success() => {
                let record: HubDataset = response.json().await?;
                Ok(Some(to_dataset(record)))
            }
            status => Err(AppError::ExternalServiceError(format!(
                "hub detail for {} returned {}",
                id, status
            ))),
        }
    }
}

fn to_dataset(record: HubDataset) -> Dataset {
    let name = record
        .id
        .rsplit('/')
        .next()
        .unwrap_or(&record.id)
        .to_string();

    let author = record
        .author
        .or_else(|| record.id.split_once('/').map(|(owner, _)| owner.to_string()))
        .unwrap_or_default();

    let size_bytes = record
        .card_data
        .as_ref()
        .and_then(|card| card.get("size"))
        .and_then(|size| size.as_u64());

    let description = record
        .description
        .map(|d| d.trim().to_string())
        .unwrap_or_default();

    let last_updated = record
        .last_modified
        .map(|ts| ts.chars().take(10).collect())
        .unwrap_or_default();

    Dataset {
        id: record.id,
        name,
        description,
        size: size_bytes.map(format_bytes).unwrap_or_else(|| "Unknown".to_string()),
        downloads: record.downloads.unwrap_or(0),
        last_updated,
        author,
        tags: record.tags,
    }
}
