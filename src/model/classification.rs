//! Classification verdicts and results

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Risk classification verdict under the EU AI Act
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RiskClass {
    #[serde(rename = "prohibited")]
    Prohibited,
    #[serde(rename = "high-risk")]
    HighRisk,
    #[serde(rename = "gpai")]
    Gpai,
    #[serde(rename = "limited-risk")]
    LimitedRisk,
    #[serde(rename = "minimal-risk")]
    MinimalRisk,
}

impl RiskClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskClass::Prohibited => "prohibited",
            RiskClass::HighRisk => "high-risk",
            RiskClass::Gpai => "gpai",
            RiskClass::LimitedRisk => "limited-risk",
            RiskClass::MinimalRisk => "minimal-risk",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "prohibited" => Some(RiskClass::Prohibited),
            "high-risk" => Some(RiskClass::HighRisk),
            "gpai" => Some(RiskClass::Gpai),
            "limited-risk" => Some(RiskClass::LimitedRisk),
            "minimal-risk" => Some(RiskClass::MinimalRisk),
            _ => None,
        }
    }
}

impl fmt::Display for RiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compliance workflow status tracked on the assessed system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ComplianceStatus {
    #[serde(rename = "not-started")]
    NotStarted,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "compliant")]
    Compliant,
    #[serde(rename = "non-compliant")]
    NonCompliant,
}

impl ComplianceStatus {
    /// Status derived from a fresh verdict at save time. Prohibited systems
    /// are immediately non-compliant; everything else starts its compliance
    /// workflow from scratch.
    pub fn from_verdict(verdict: RiskClass) -> Self {
        match verdict {
            RiskClass::Prohibited => ComplianceStatus::NonCompliant,
            _ => ComplianceStatus::NotStarted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::NotStarted => "not-started",
            ComplianceStatus::InProgress => "in-progress",
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::NonCompliant => "non-compliant",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "not-started" => Some(ComplianceStatus::NotStarted),
            "in-progress" => Some(ComplianceStatus::InProgress),
            "compliant" => Some(ComplianceStatus::Compliant),
            "non-compliant" => Some(ComplianceStatus::NonCompliant),
            _ => None,
        }
    }
}

/// Output of the classification engine, immutable once produced
///
/// `systemic_risk` carries the GPAI obligation tier structurally so callers
/// never have to parse it back out of the reasoning prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationResult {
    pub verdict: RiskClass,
    pub reasoning: String,
    /// Raw transparency trigger. Forced false on a prohibited verdict, which
    /// short-circuits before transparency is evaluated. Whether a high-risk
    /// verdict should additionally imply Article 50 duties when no
    /// transparency box was checked is an open product/legal question; the
    /// rule set deliberately does not tighten it here.
    pub transparency_required: bool,
    pub systemic_risk: bool,
    pub prohibited_flags: Vec<String>,
    pub high_risk_categories: Vec<String>,
    pub gpai_flags: Vec<String>,
    pub transparency_flags: Vec<String>,
}
