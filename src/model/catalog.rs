//! Static questionnaire catalog for EU AI Act classification
//!
//! Pure data. The classifier branches on category membership, never on
//! individual item ids, so adding or removing an item here does not touch
//! the decision logic.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Questionnaire category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Prohibited,
    HighRisk,
    GeneralPurposeModel,
    Transparency,
}

/// One yes/no regulatory question
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CheckItem {
    pub id: &'static str,
    pub prompt: &'static str,
    /// Source article or annex. Informational only.
    pub citation: &'static str,
}

/// One Annex III high-risk use case. Multi-select category rather than a
/// yes/no question, so it carries a title and description instead of a prompt.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HighRiskCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub citation: &'static str,
}

/// Practices banned outright under Article 5
pub const PROHIBITED_CHECKS: [CheckItem; 7] = [
    CheckItem {
        id: "subliminal",
        prompt: "Does this system use subliminal techniques to materially distort behavior in a manner that causes harm?",
        citation: "Article 5(1)(a)",
    },
    CheckItem {
        id: "vulnerability",
        prompt: "Does it exploit vulnerabilities of specific groups (age, disability, social/economic situation)?",
        citation: "Article 5(1)(b)",
    },
    CheckItem {
        id: "social_scoring",
        prompt: "Is it used by public authorities for social scoring that leads to detrimental treatment?",
        citation: "Article 5(1)(c)",
    },
    CheckItem {
        id: "biometric_public",
        prompt: "Does it use real-time remote biometric identification in publicly accessible spaces for law enforcement?",
        citation: "Article 5(1)(d)",
    },
    CheckItem {
        id: "emotion_workplace",
        prompt: "Does it infer emotions in workplace or education contexts?",
        citation: "Article 5(1)(f)",
    },
    CheckItem {
        id: "biometric_categorization",
        prompt: "Does it perform biometric categorization to infer sensitive attributes (race, political opinions, sexual orientation)?",
        citation: "Article 5(1)(e)",
    },
    CheckItem {
        id: "facial_scraping",
        prompt: "Does it scrape facial images from the internet or CCTV for facial recognition databases?",
        citation: "Article 5(1)(g)",
    },
];

/// Annex III high-risk use-case categories, points 1 through 8
pub const HIGH_RISK_CATEGORIES: [HighRiskCategory; 8] = [
    HighRiskCategory {
        id: "biometric",
        title: "Biometric Identification and Categorization",
        description: "Remote biometric identification of persons",
        citation: "Annex III, Point 1",
    },
    HighRiskCategory {
        id: "infrastructure",
        title: "Critical Infrastructure",
        description: "Safety component in management/operation of road traffic, water/gas/electricity supply",
        citation: "Annex III, Point 2",
    },
    HighRiskCategory {
        id: "education",
        title: "Education and Vocational Training",
        description: "Determining access, evaluating learning outcomes, monitoring students, detecting cheating",
        citation: "Annex III, Point 3",
    },
    HighRiskCategory {
        id: "employment",
        title: "Employment and Worker Management",
        description: "Recruitment, hiring, task allocation, monitoring, evaluation, promotion, termination",
        citation: "Annex III, Point 4",
    },
    HighRiskCategory {
        id: "essential_services",
        title: "Access to Essential Services",
        description: "Evaluating creditworthiness, pricing/risk for life/health insurance, assessing emergency services",
        citation: "Annex III, Point 5",
    },
    HighRiskCategory {
        id: "law_enforcement",
        title: "Law Enforcement",
        description: "Risk assessment for offense/reoffense, polygraphs, evidence evaluation, offense profiling, deep fakes detection",
        citation: "Annex III, Point 6",
    },
    HighRiskCategory {
        id: "migration",
        title: "Migration, Asylum, Border Control",
        description: "Polygraphs, risk assessment, authenticity verification, assisting authorities",
        citation: "Annex III, Point 7",
    },
    HighRiskCategory {
        id: "justice",
        title: "Administration of Justice",
        description: "Assisting judicial authorities in researching/interpreting facts and law",
        citation: "Annex III, Point 8",
    },
];

/// First of the two general-purpose model questions
pub const GPAI_CHECK: CheckItem = CheckItem {
    id: "is_general_purpose",
    prompt: "Is this a general-purpose AI model trained on large amounts of data that can perform a wide range of tasks?",
    citation: "Chapter V, Article 51",
};

/// Second general-purpose question, asked only when the first is answered yes
pub const GPAI_SYSTEMIC_RISK_CHECK: CheckItem = CheckItem {
    id: "has_systemic_risk",
    prompt: "Does it have systemic risk (training compute above 10^25 FLOPs or designated as such)?",
    citation: "Chapter V, Article 51(1)",
};

/// User-disclosure triggers under Article 50
pub const TRANSPARENCY_CHECKS: [CheckItem; 4] = [
    CheckItem {
        id: "direct_interaction",
        prompt: "Does this system interact directly with humans (chatbot, voice assistant)?",
        citation: "Article 50(1)",
    },
    CheckItem {
        id: "synthetic_content",
        prompt: "Does it generate or manipulate synthetic content (deepfakes, AI-generated text/images)?",
        citation: "Article 50(2)",
    },
    CheckItem {
        id: "emotion_recognition",
        prompt: "Does it perform emotion recognition (excluding prohibited contexts)?",
        citation: "Article 50(3)",
    },
    CheckItem {
        id: "biometric_categorization_transparent",
        prompt: "Does it perform biometric categorization (excluding prohibited sensitive attributes)?",
        citation: "Article 50(4)",
    },
];

/// Look up a prohibited-practice check by id
pub fn prohibited_check(id: &str) -> Option<&'static CheckItem> {
    PROHIBITED_CHECKS.iter().find(|c| c.id == id)
}

/// Look up an Annex III category by id
pub fn high_risk_category(id: &str) -> Option<&'static HighRiskCategory> {
    HIGH_RISK_CATEGORIES.iter().find(|c| c.id == id)
}

/// Look up a general-purpose model question by id
pub fn gpai_check(id: &str) -> Option<&'static CheckItem> {
    [&GPAI_CHECK, &GPAI_SYSTEMIC_RISK_CHECK]
        .into_iter()
        .find(|c| c.id == id)
}

/// Look up a transparency check by id
pub fn transparency_check(id: &str) -> Option<&'static CheckItem> {
    TRANSPARENCY_CHECKS.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_cardinality() {
        assert_eq!(PROHIBITED_CHECKS.len(), 7);
        assert_eq!(HIGH_RISK_CATEGORIES.len(), 8);
        assert_eq!(TRANSPARENCY_CHECKS.len(), 4);
    }

    #[test]
    fn test_ids_unique_within_category() {
        let mut prohibited: Vec<_> = PROHIBITED_CHECKS.iter().map(|c| c.id).collect();
        prohibited.sort_unstable();
        prohibited.dedup();
        assert_eq!(prohibited.len(), PROHIBITED_CHECKS.len());

        let mut high_risk: Vec<_> = HIGH_RISK_CATEGORIES.iter().map(|c| c.id).collect();
        high_risk.sort_unstable();
        high_risk.dedup();
        assert_eq!(high_risk.len(), HIGH_RISK_CATEGORIES.len());
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(
            prohibited_check("biometric_public").map(|c| c.citation),
            Some("Article 5(1)(d)")
        );
        assert_eq!(
            high_risk_category("employment").map(|c| c.citation),
            Some("Annex III, Point 4")
        );
        assert_eq!(
            transparency_check("synthetic_content").map(|c| c.citation),
            Some("Article 50(2)")
        );
        assert!(gpai_check("is_general_purpose").is_some());
        assert!(gpai_check("has_systemic_risk").is_some());
        assert!(prohibited_check("employment").is_none());
    }
}
