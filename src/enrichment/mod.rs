//! Clients for the external enrichment service
//!
//! Two optional calls wrap the core engine: research pre-fill of the
//! questionnaire from provider/product URLs, and a compliance-training
//! recommendation after a high-risk or GPAI verdict. Both are best-effort;
//! failures degrade to manual entry or no recommendation.

mod research;
mod training;

use std::env;

pub use research::ResearchClient;
pub use training::{CourseRecommendation, TrainingClient};

const ENV_ENRICHMENT_BASE_URL: &str = "SENTINEL_ENRICHMENT_BASE_URL";
const DEFAULT_ENRICHMENT_BASE_URL: &str = "http://127.0.0.1:8090";

#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("URL blocked by configuration: {0}")]
    Blocked(String),

    #[error("Enrichment service returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Resolve the enrichment base URL: env var, then config file, then default
fn resolve_base_url(configured: Option<&str>) -> String {
    env::var(ENV_ENRICHMENT_BASE_URL)
        .ok()
        .or_else(|| configured.map(|s| s.to_string()))
        .unwrap_or_else(|| DEFAULT_ENRICHMENT_BASE_URL.to_string())
}
