//! Assessed AI system, the subject entity of classification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

use super::answers::AnswerSet;
use super::classification::{ComplianceStatus, RiskClass};

/// A registered AI system under assessment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AiSystem {
    pub id: Uuid,
    pub name: String,
    pub purpose: Option<String>,
    pub provider_name: Option<String>,
    pub provider_url: Option<Url>,
    pub product_url: Option<Url>,
    /// Raw answers from the last completed assessment, kept for audit and
    /// to resume the wizard pre-populated
    pub assessment_answers: Option<AnswerSet>,
    pub risk_classification: Option<RiskClass>,
    pub classification_reasoning: Option<String>,
    pub compliance_status: ComplianceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied at registration time
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewAiSystem {
    pub name: String,
    pub purpose: Option<String>,
    pub provider_name: Option<String>,
    pub provider_url: Option<Url>,
    pub product_url: Option<Url>,
}
