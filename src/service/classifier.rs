//! Risk classification engine
//!
//! Pure decision function over a completed answer set. Strict priority
//! order: prohibited > high-risk > gpai > limited-risk > minimal-risk.
//! Each rule short-circuits; later rules never override an earlier match.
//! No I/O and no failure modes, so it is safe to unit test exhaustively.

use crate::model::answers::{AnswerSet, FlagMap};
use crate::model::classification::{ClassificationResult, RiskClass};

const REASONING_PROHIBITED: &str = "System matches prohibited AI practice criteria under Article 5 of the EU AI Act. Deployment is not permitted.";
const REASONING_HIGH_RISK: &str = "System falls under one or more Annex III high-risk categories. Subject to full compliance requirements including conformity assessment, CE marking, and EU database registration.";
const REASONING_GPAI_SYSTEMIC: &str = "System is a General-Purpose AI model with systemic risk. Subject to Chapter V obligations including model evaluation and incident reporting.";
const REASONING_GPAI: &str = "System is a General-Purpose AI model. Subject to transparency and documentation requirements under Chapter V.";
const REASONING_LIMITED: &str = "System triggers transparency obligations under Article 50. Users must be informed they are interacting with AI.";
const REASONING_MINIMAL: &str = "System does not fall under prohibited, high-risk, or GPAI categories. Minimal regulatory requirements apply.";

/// Ids answered true, in map insertion order
fn true_flags(map: &FlagMap) -> Vec<String> {
    map.iter()
        .filter(|(_, v)| **v)
        .map(|(k, _)| k.clone())
        .collect()
}

/// Classify an answer set into a verdict with reasoning and flags
///
/// Unanswered items count as "not triggered"; an entirely empty answer set
/// classifies as minimal-risk.
pub fn classify(answers: &AnswerSet) -> ClassificationResult {
    let prohibited_flags = true_flags(&answers.prohibited);
    let high_risk_categories = true_flags(&answers.high_risk);
    let transparency_flags = true_flags(&answers.transparency);

    let is_general_purpose = answers.general_purpose.is_general_purpose == Some(true);
    let systemic_risk =
        is_general_purpose && answers.general_purpose.has_systemic_risk == Some(true);
    let gpai_flags = if is_general_purpose {
        vec!["gpai".to_string()]
    } else {
        Vec::new()
    };

    let transparency_triggered = !transparency_flags.is_empty();

    // Prohibited wins over everything and short-circuits before the
    // transparency trigger is evaluated.
    if !prohibited_flags.is_empty() {
        return ClassificationResult {
            verdict: RiskClass::Prohibited,
            reasoning: REASONING_PROHIBITED.to_string(),
            transparency_required: false,
            systemic_risk,
            prohibited_flags,
            high_risk_categories,
            gpai_flags,
            transparency_flags,
        };
    }

    let (verdict, reasoning) = if !high_risk_categories.is_empty() {
        (RiskClass::HighRisk, REASONING_HIGH_RISK)
    } else if is_general_purpose {
        // Verdict stays `gpai` either way; the obligation tier is carried
        // in `systemic_risk` and the reasoning text.
        if systemic_risk {
            (RiskClass::Gpai, REASONING_GPAI_SYSTEMIC)
        } else {
            (RiskClass::Gpai, REASONING_GPAI)
        }
    } else if transparency_triggered {
        (RiskClass::LimitedRisk, REASONING_LIMITED)
    } else {
        (RiskClass::MinimalRisk, REASONING_MINIMAL)
    };

    ClassificationResult {
        verdict,
        reasoning: reasoning.to_string(),
        transparency_required: transparency_triggered,
        systemic_risk,
        prohibited_flags,
        high_risk_categories,
        gpai_flags,
        transparency_flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> AnswerSet {
        AnswerSet::default()
    }

    #[test]
    fn test_deterministic() {
        let mut a = answers();
        a.set_prohibited("subliminal", false);
        a.set_high_risk("employment", true);
        a.set_transparency("direct_interaction", true);
        assert_eq!(classify(&a), classify(&a));
    }

    #[test]
    fn test_empty_answers_minimal_risk() {
        let result = classify(&answers());
        assert_eq!(result.verdict, RiskClass::MinimalRisk);
        assert!(!result.transparency_required);
        assert!(!result.systemic_risk);
        assert!(result.prohibited_flags.is_empty());
        assert!(result.high_risk_categories.is_empty());
        assert!(result.gpai_flags.is_empty());
        assert!(result.transparency_flags.is_empty());
    }

    #[test]
    fn test_prohibited_wins_over_high_risk() {
        let mut a = answers();
        a.set_prohibited("social_scoring", true);
        a.set_high_risk("employment", true);
        let result = classify(&a);
        assert_eq!(result.verdict, RiskClass::Prohibited);
        // High-risk flags still reported even though the verdict is prohibited
        assert_eq!(result.high_risk_categories, vec!["employment"]);
    }

    #[test]
    fn test_high_risk_wins_over_gpai() {
        let mut a = answers();
        a.set_high_risk("law_enforcement", true);
        a.set_is_general_purpose(true);
        let result = classify(&a);
        assert_eq!(result.verdict, RiskClass::HighRisk);
        assert_eq!(result.gpai_flags, vec!["gpai"]);
    }

    #[test]
    fn test_gpai_wins_over_transparency() {
        let mut a = answers();
        a.set_is_general_purpose(true);
        a.set_transparency("direct_interaction", true);
        let result = classify(&a);
        assert_eq!(result.verdict, RiskClass::Gpai);
        assert!(result.transparency_required);
    }

    #[test]
    fn test_transparency_independent_of_verdict() {
        let mut a = answers();
        a.set_high_risk("education", true);
        a.set_transparency("synthetic_content", true);
        let result = classify(&a);
        assert_eq!(result.verdict, RiskClass::HighRisk);
        assert!(result.transparency_required);
        assert_eq!(result.transparency_flags, vec!["synthetic_content"]);
    }

    #[test]
    fn test_prohibited_suppresses_transparency_flag() {
        let mut a = answers();
        a.set_prohibited("biometric_public", true);
        a.set_transparency("direct_interaction", true);
        let result = classify(&a);
        assert_eq!(result.verdict, RiskClass::Prohibited);
        assert!(!result.transparency_required);
        // Raw flags still list what was checked
        assert_eq!(result.transparency_flags, vec!["direct_interaction"]);
    }

    #[test]
    fn test_gpai_reasoning_differs_by_systemic_risk() {
        let mut plain = answers();
        plain.set_is_general_purpose(true);
        plain.set_has_systemic_risk(false);
        let plain_result = classify(&plain);

        let mut systemic = answers();
        systemic.set_is_general_purpose(true);
        systemic.set_has_systemic_risk(true);
        let systemic_result = classify(&systemic);

        assert_eq!(plain_result.verdict, RiskClass::Gpai);
        assert_eq!(systemic_result.verdict, RiskClass::Gpai);
        assert_ne!(plain_result.reasoning, systemic_result.reasoning);
        assert!(systemic_result.reasoning.contains("systemic risk"));
        assert!(systemic_result.reasoning.contains("incident reporting"));
        assert!(!plain_result.systemic_risk);
        assert!(systemic_result.systemic_risk);
    }

    #[test]
    fn test_systemic_risk_requires_general_purpose() {
        // has_systemic_risk alone, without is_general_purpose, means nothing
        let mut a = answers();
        a.set_has_systemic_risk(true);
        let result = classify(&a);
        assert_eq!(result.verdict, RiskClass::MinimalRisk);
        assert!(!result.systemic_risk);
        assert!(result.gpai_flags.is_empty());
    }

    #[test]
    fn test_flags_exclude_false_and_unanswered() {
        let mut a = answers();
        a.set_prohibited("subliminal", false);
        a.set_high_risk("employment", true);
        a.set_high_risk("education", true);
        a.set_high_risk("justice", false);
        let result = classify(&a);
        assert_eq!(result.verdict, RiskClass::HighRisk);
        assert!(result.prohibited_flags.is_empty());
        // Insertion order preserved
        assert_eq!(result.high_risk_categories, vec!["employment", "education"]);
    }

    #[test]
    fn test_scenario_prohibited_only() {
        let mut a = answers();
        a.set_prohibited("biometric_public", true);
        let result = classify(&a);
        assert_eq!(result.verdict, RiskClass::Prohibited);
        assert!(result.high_risk_categories.is_empty());
        assert!(!result.transparency_required);
        assert!(result.reasoning.contains("Article 5"));
    }

    #[test]
    fn test_scenario_transparency_only() {
        let mut a = answers();
        a.set_transparency("synthetic_content", true);
        let result = classify(&a);
        assert_eq!(result.verdict, RiskClass::LimitedRisk);
        assert!(result.transparency_required);
        assert!(result.reasoning.contains("Article 50"));
    }

    #[test]
    fn test_all_false_is_minimal_risk() {
        let mut a = answers();
        a.set_prohibited("subliminal", false);
        a.set_high_risk("biometric", false);
        a.set_is_general_purpose(false);
        a.set_transparency("emotion_recognition", false);
        let result = classify(&a);
        assert_eq!(result.verdict, RiskClass::MinimalRisk);
        assert!(!result.transparency_required);
    }
}
