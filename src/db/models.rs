//! Database models for assessed AI systems

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use url::Url;
use uuid::Uuid;

use crate::model::{AiSystem, AnswerSet, ComplianceStatus, RiskClass};

/// Database representation of an AI system
#[derive(Debug, Clone, FromRow)]
pub struct AiSystemRow {
    pub id: Uuid,
    pub name: String,
    pub purpose: Option<String>,
    pub provider_name: Option<String>,
    pub provider_url: Option<String>,
    pub product_url: Option<String>,
    pub assessment_answers: serde_json::Value,
    pub risk_classification: Option<String>,
    pub classification_reasoning: Option<String>,
    pub compliance_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AiSystemRow {
    /// Convert database row to domain model
    pub fn into_domain(self) -> Result<AiSystem, String> {
        let provider_url = self.provider_url.as_ref().and_then(|u| Url::parse(u).ok());
        let product_url = self.product_url.as_ref().and_then(|u| Url::parse(u).ok());

        // An empty JSONB object means the system was never assessed
        let assessment_answers: Option<AnswerSet> = match &self.assessment_answers {
            serde_json::Value::Object(map) if map.is_empty() => None,
            serde_json::Value::Null => None,
            value => Some(
                serde_json::from_value(value.clone())
                    .map_err(|e| format!("Invalid assessment answers: {}", e))?,
            ),
        };

        let risk_classification = match self.risk_classification.as_deref() {
            Some(s) => Some(
                RiskClass::from_str(s).ok_or_else(|| format!("Unknown risk class '{}'", s))?,
            ),
            None => None,
        };

        let compliance_status = ComplianceStatus::from_str(&self.compliance_status)
            .unwrap_or(ComplianceStatus::NotStarted);

        Ok(AiSystem {
            id: self.id,
            name: self.name,
            purpose: self.purpose,
            provider_name: self.provider_name,
            provider_url,
            product_url,
            assessment_answers,
            risk_classification,
            classification_reasoning: self.classification_reasoning,
            compliance_status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Query parameters for listing systems
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSystemsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub risk_classification: Option<String>,
    pub compliance_status: Option<String>,
}

/// Paginated response for systems
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedSystems {
    pub systems: Vec<AiSystem>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(answers: serde_json::Value, classification: Option<&str>) -> AiSystemRow {
        AiSystemRow {
            id: Uuid::new_v4(),
            name: "Screening Tool".to_string(),
            purpose: Some("Candidate screening".to_string()),
            provider_name: None,
            provider_url: Some("https://example.com".to_string()),
            product_url: None,
            assessment_answers: answers,
            risk_classification: classification.map(|s| s.to_string()),
            classification_reasoning: None,
            compliance_status: "not-started".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_answers_means_unassessed() {
        let system = row(serde_json::json!({}), None).into_domain().unwrap();
        assert!(system.assessment_answers.is_none());
        assert!(system.risk_classification.is_none());
    }

    #[test]
    fn test_stored_answers_roundtrip() {
        let system = row(
            serde_json::json!({
                "high_risk": { "employment": true },
                "general_purpose": { "is_general_purpose": false }
            }),
            Some("high-risk"),
        )
        .into_domain()
        .unwrap();

        let answers = system.assessment_answers.unwrap();
        assert_eq!(answers.high_risk.get("employment"), Some(&true));
        assert_eq!(system.risk_classification, Some(RiskClass::HighRisk));
    }

    #[test]
    fn test_unknown_risk_class_rejected() {
        assert!(row(serde_json::json!({}), Some("medium-risk"))
            .into_domain()
            .is_err());
    }
}
