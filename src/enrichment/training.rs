//! Training recommendation client
//!
//! After a high-risk or GPAI verdict is persisted, asks the enrichment
//! service whether compliance training should be suggested. No
//! recommendation is a normal outcome, not an error.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{resolve_base_url, EnrichmentError};
use crate::model::RiskClass;

/// Client for the enrichment service's training-recommendation endpoint
pub struct TrainingClient {
    client: Client,
    base_url: String,
}

/// A suggested compliance course, surfaced as a call-to-action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseRecommendation {
    pub course_id: String,
    pub title: String,
}

#[derive(Debug, Serialize)]
struct RecommendationRequest {
    system_id: Uuid,
    classification: RiskClass,
}

#[derive(Debug, Deserialize)]
struct RecommendationResponse {
    #[serde(default)]
    needed: bool,
    #[serde(default)]
    courses: Vec<CourseRecommendation>,
}

impl TrainingClient {
    pub fn new(configured_base_url: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: resolve_base_url(configured_base_url),
        }
    }

    /// Ask for a training recommendation for a freshly classified system.
    /// Returns the first suggested course, or `None` when training is not
    /// needed or no courses match.
    pub async fn recommend(
        &self,
        system_id: Uuid,
        classification: RiskClass,
    ) -> Result<Option<CourseRecommendation>, EnrichmentError> {
        let endpoint = format!("{}/v1/training-recommendations", self.base_url);

        tracing::debug!(
            system_id = %system_id,
            classification = %classification,
            "Requesting training recommendation"
        );

        let response = self
            .client
            .post(&endpoint)
            .json(&RecommendationRequest {
                system_id,
                classification,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnrichmentError::Status(response.status()));
        }

        let recommendation: RecommendationResponse = response.json().await.map_err(|e| {
            EnrichmentError::Parse(format!(
                "Failed to deserialize recommendation response: {}",
                e
            ))
        })?;

        if !recommendation.needed {
            return Ok(None);
        }

        Ok(recommendation.courses.into_iter().next())
    }
}
