//! Dataset catalog
//!
//! A [`DatasetCatalog`] resolves dataset ids to records and answers browse
//! queries. Two backends exist: [`MockCatalog`] serves the built-in records
//! and [`HubCatalog`] talks to the public dataset hub over HTTPS.

mod hub;
mod mock;

pub use hub::HubCatalog;
pub use mock::MockCatalog;

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{CatalogSource, Config};
use crate::models::Dataset;
use crate::AppResult;

pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 200;

#[async_trait]
pub trait DatasetCatalog: Send + Sync {
    /// Backend name for logs and health output
    fn name(&self) -> &'static str;

    async fn list(&self, query: &CatalogQuery) -> AppResult<Vec<Dataset>>;

    async fn get(&self, id: &str) -> AppResult<Option<Dataset>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most downloaded first
    Downloads,
    /// Alphabetical by name
    Name,
    /// Most recently updated first
    Updated,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub sort: Option<SortOrder>,
    pub limit: Option<usize>,
}

impl CatalogQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }

    pub fn matches(&self, dataset: &Dataset) -> bool {
        let search_ok = self
            .search
            .as_deref()
            .map_or(true, |needle| dataset.matches_search(needle.trim()));

        search_ok && self.tags.iter().all(|tag| dataset.has_tag(tag))
    }

    /// Filter, sort and truncate in place
    pub fn apply(&self, datasets: &mut Vec<Dataset>) {
        datasets.retain(|d| self.matches(d));

        match self.sort {
            Some(SortOrder::Downloads) => datasets.sort_by(|a, b| b.downloads.cmp(&a.downloads)),
            Some(SortOrder::Name) => {
                datasets.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
            Some(SortOrder::Updated) => {
                datasets.sort_by(|a, b| b.last_updated.cmp(&a.last_updated))
            }
            None => {}
        }

        datasets.truncate(self.limit());
    }
}

/// Sorted distinct tags, optionally narrowed by a case-insensitive substring
pub async fn tags(catalog: &dyn DatasetCatalog, filter: Option<&str>) -> AppResult<Vec<String>> {
    let query = CatalogQuery {
        limit: Some(MAX_LIMIT),
        ..Default::default()
    };
    let needle = filter.map(|f| f.trim().to_lowercase()).unwrap_or_default();

    let tags: BTreeSet<String> = catalog
        .list(&query)
        .await?
        .into_iter()
        .flat_map(|d| d.tags)
        .filter(|t| t.to_lowercase().contains(&needle))
        .collect();

    Ok(tags.into_iter().collect())
}

/// Build the catalog selected by configuration
pub fn from_config(config: &Config) -> AppResult<Arc<dyn DatasetCatalog>> {
    let catalog: Arc<dyn DatasetCatalog> = match config.catalog_source {
        CatalogSource::Mock => Arc::new(MockCatalog::new()),
        CatalogSource::Hub => Arc::new(HubCatalog::new(&config.hub_base_url, config.hub_timeout())?),
    };

    tracing::info!("Dataset catalog: {}", catalog.name());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_capped() {
        let query = CatalogQuery {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(query.limit(), MAX_LIMIT);
        assert_eq!(CatalogQuery::default().limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_tags_are_sorted_and_distinct() {
        let catalog = MockCatalog::new();
        let all = tokio_test::block_on(tags(&catalog, None)).unwrap();
        let mut sorted = all.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(all, sorted);
        assert!(all.contains(&"nlp".to_string()));

        let vision = tokio_test::block_on(tags(&catalog, Some("VIS"))).unwrap();
        assert_eq!(vision, vec!["computer-vision".to_string(), "vision".to_string()]);
    }
}
