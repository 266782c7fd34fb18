//! Mutable working state of one assessment
//!
//! An absent key means the item was never answered, which the classifier
//! treats differently from an explicit `false`. Answer maps keep insertion
//! order so result flags come out in the order questions were answered.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Boolean flag map keyed by check-item id
pub type FlagMap = IndexMap<String, bool>;

/// Answers to the two general-purpose model questions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GeneralPurposeAnswers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_general_purpose: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_systemic_risk: Option<bool>,
}

/// All answers collected during one assessment pass
///
/// Stored verbatim in the `assessment_answers` JSONB column once the
/// assessment completes, and read back to resume a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AnswerSet {
    pub prohibited: FlagMap,
    pub high_risk: FlagMap,
    pub general_purpose: GeneralPurposeAnswers,
    pub transparency: FlagMap,
}

/// Partial answers produced by the research gateway
///
/// Categories the research could not score are absent and leave the
/// session's answers for that category untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerPrefill {
    pub prohibited: Option<FlagMap>,
    pub high_risk: Option<FlagMap>,
    pub general_purpose: Option<GeneralPurposeAnswers>,
    pub transparency: Option<FlagMap>,
}

impl AnswerSet {
    /// True when nothing has been answered in any category
    pub fn is_empty(&self) -> bool {
        self.prohibited.is_empty()
            && self.high_risk.is_empty()
            && self.general_purpose == GeneralPurposeAnswers::default()
            && self.transparency.is_empty()
    }

    pub fn set_prohibited(&mut self, item_id: &str, value: bool) {
        self.prohibited.insert(item_id.to_string(), value);
    }

    pub fn set_high_risk(&mut self, item_id: &str, value: bool) {
        self.high_risk.insert(item_id.to_string(), value);
    }

    pub fn set_transparency(&mut self, item_id: &str, value: bool) {
        self.transparency.insert(item_id.to_string(), value);
    }

    pub fn set_is_general_purpose(&mut self, value: bool) {
        self.general_purpose.is_general_purpose = Some(value);
    }

    pub fn set_has_systemic_risk(&mut self, value: bool) {
        self.general_purpose.has_systemic_risk = Some(value);
    }

    /// Apply research pre-fill: each present category replaces the existing
    /// map wholesale. Absent categories are left alone. This is a
    /// category-level replace, not a per-key merge.
    pub fn apply_prefill(&mut self, prefill: AnswerPrefill) {
        if let Some(map) = prefill.prohibited {
            self.prohibited = map;
        }
        if let Some(map) = prefill.high_risk {
            self.high_risk = map;
        }
        if let Some(answers) = prefill.general_purpose {
            self.general_purpose = answers;
        }
        if let Some(map) = prefill.transparency {
            self.transparency = map;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(entries: &[(&str, bool)]) -> FlagMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_empty_distinct_from_false() {
        let mut answers = AnswerSet::default();
        assert!(answers.is_empty());

        answers.set_prohibited("subliminal", false);
        assert!(!answers.is_empty());
        assert_eq!(answers.prohibited.get("subliminal"), Some(&false));
        assert_eq!(answers.prohibited.get("social_scoring"), None);
    }

    #[test]
    fn test_set_answer_overwrites() {
        let mut answers = AnswerSet::default();
        answers.set_high_risk("employment", true);
        answers.set_high_risk("employment", false);
        assert_eq!(answers.high_risk.get("employment"), Some(&false));
        assert_eq!(answers.high_risk.len(), 1);
    }

    #[test]
    fn test_prefill_replaces_present_categories_only() {
        let mut answers = AnswerSet::default();
        answers.set_prohibited("subliminal", true);
        answers.set_transparency("direct_interaction", true);

        answers.apply_prefill(AnswerPrefill {
            prohibited: Some(flags(&[("social_scoring", true)])),
            high_risk: Some(flags(&[("employment", true)])),
            general_purpose: None,
            transparency: None,
        });

        // Present categories replaced wholesale, including already-entered keys
        assert_eq!(answers.prohibited.get("subliminal"), None);
        assert_eq!(answers.prohibited.get("social_scoring"), Some(&true));
        assert_eq!(answers.high_risk.get("employment"), Some(&true));
        // Absent categories untouched
        assert_eq!(answers.transparency.get("direct_interaction"), Some(&true));
        assert_eq!(answers.general_purpose, GeneralPurposeAnswers::default());
    }

    #[test]
    fn test_serde_shape() {
        let mut answers = AnswerSet::default();
        answers.set_prohibited("subliminal", true);
        answers.set_is_general_purpose(false);

        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json["prohibited"]["subliminal"], true);
        assert_eq!(json["general_purpose"]["is_general_purpose"], false);
        // Unanswered systemic risk is absent, not null
        assert!(json["general_purpose"]
            .as_object()
            .unwrap()
            .get("has_systemic_risk")
            .is_none());

        let roundtrip: AnswerSet = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, answers);
    }
}
