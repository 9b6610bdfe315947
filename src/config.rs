//! Configuration module

use std::env;
use std::time::Duration;

use crate::impact::ScoringStrategy;

/// Where dataset records come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// Built-in mock records
    Mock,
    /// Public dataset hub REST API
    Hub,
}

impl CatalogSource {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mock" => Some(Self::Mock),
            "hub" => Some(Self::Hub),
            _ => None,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// JWT secret key
    pub jwt_secret: String,

    /// Session lifetime in hours
    pub session_expiration_hours: u64,

    /// Catalog backend
    pub catalog_source: CatalogSource,

    /// Dataset hub base URL
    pub hub_base_url: String,

    /// Dataset hub request timeout in seconds
    pub hub_timeout_secs: u64,

    /// Impact score strategy
    pub impact_scoring: ScoringStrategy,

    /// Default chart edge length in pixels
    pub chart_size: u32,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            jwt_secret: "dataset-explorer-dev-secret-change-in-production".to_string(),
            session_expiration_hours: 24,
            catalog_source: CatalogSource::Mock,
            hub_base_url: "https://huggingface.co".to_string(),
            hub_timeout_secs: 10,
            impact_scoring: ScoringStrategy::Deterministic,
            chart_size: 300,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or(defaults.jwt_secret),

            session_expiration_hours: env::var("SESSION_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.session_expiration_hours),

            catalog_source: env::var("CATALOG_SOURCE")
                .ok()
                .and_then(|s| CatalogSource::parse(&s))
                .unwrap_or(defaults.catalog_source),

            hub_base_url: env::var("HUB_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.hub_base_url),

            hub_timeout_secs: env::var("HUB_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.hub_timeout_secs),

            impact_scoring: env::var("IMPACT_SCORING")
                .ok()
                .and_then(|s| ScoringStrategy::parse(&s))
                .unwrap_or(defaults.impact_scoring),

            chart_size: env::var("CHART_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|size| crate::render::CHART_SIZE_RANGE.contains(size))
                .unwrap_or(defaults.chart_size),

            environment: env::var("ENVIRONMENT")
                .unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// True while the signing key is still the built-in development key
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == Self::default().jwt_secret
    }

    pub fn hub_timeout(&self) -> Duration {
        Duration::from_secs(self.hub_timeout_secs)
    }
}
