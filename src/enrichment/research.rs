//! Research client for questionnaire pre-fill
//!
//! Sends the registered provider/product URLs to the enrichment service,
//! which researches the product and returns per-category flag maps used to
//! pre-populate the wizard.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{resolve_base_url, EnrichmentError};
use crate::model::answers::{AnswerPrefill, FlagMap, GeneralPurposeAnswers};
use crate::model::EnrichmentConfig;

/// Client for the enrichment service's analyze endpoint
pub struct ResearchClient {
    client: Client,
    base_url: String,
    config: EnrichmentConfig,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    provider_url: Option<&'a Url>,
    product_url: Option<&'a Url>,
}

// Response models - only the fields we need
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    prohibited_flags: Option<FlagMap>,
    high_risk_flags: Option<FlagMap>,
    general_purpose: Option<GeneralPurposeAnswers>,
    transparency_flags: Option<FlagMap>,
}

impl AnalyzeResponse {
    fn into_prefill(self) -> AnswerPrefill {
        AnswerPrefill {
            prohibited: self.prohibited_flags,
            high_risk: self.high_risk_flags,
            general_purpose: self.general_purpose,
            transparency: self.transparency_flags,
        }
    }
}

impl ResearchClient {
    pub fn new(config: EnrichmentConfig) -> Self {
        let base_url = resolve_base_url(config.base_url.as_deref());

        Self {
            client: Client::new(),
            base_url,
            config,
        }
    }

    /// Research the system behind the given URLs and return a partial
    /// answer set. URLs are checked against the configured allow/deny
    /// lists before anything leaves the service.
    pub async fn analyze(
        &self,
        provider_url: Option<&Url>,
        product_url: Option<&Url>,
    ) -> Result<AnswerPrefill, EnrichmentError> {
        for url in [provider_url, product_url].into_iter().flatten() {
            if !self.config.is_url_allowed(url) {
                tracing::debug!(url = %url, "Research URL blocked by configuration");
                return Err(EnrichmentError::Blocked(url.to_string()));
            }
        }

        let endpoint = format!("{}/v1/analyze", self.base_url);

        tracing::debug!(
            endpoint = %endpoint,
            provider_url = ?provider_url.map(Url::as_str),
            product_url = ?product_url.map(Url::as_str),
            "Requesting research pre-fill"
        );

        let response = self
            .client
            .post(&endpoint)
            .json(&AnalyzeRequest {
                provider_url,
                product_url,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnrichmentError::Status(response.status()));
        }

        let analyze: AnalyzeResponse = response.json().await.map_err(|e| {
            EnrichmentError::Parse(format!("Failed to deserialize analyze response: {}", e))
        })?;

        let prefill = analyze.into_prefill();

        tracing::debug!(
            prohibited = prefill.prohibited.as_ref().map_or(0, |m| m.len()),
            high_risk = prefill.high_risk.as_ref().map_or(0, |m| m.len()),
            transparency = prefill.transparency.as_ref().map_or(0, |m| m.len()),
            "Received research pre-fill"
        );

        Ok(prefill)
    }
}
