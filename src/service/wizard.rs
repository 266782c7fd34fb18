//! Wizard state machine driving answer collection
//!
//! Owns the answer set for one assessment and only mutates it through
//! named actions, so the submit guard and the retry reset are enforced in
//! one place. The classifier runs exactly once per submission, inside
//! `begin_submit`; re-entering the result step never recomputes.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::model::answers::{AnswerPrefill, AnswerSet};
use crate::model::catalog::{self, Category};
use crate::model::classification::ClassificationResult;
use crate::service::classifier;

/// Steps of the assessment wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Intro,
    Prohibited,
    HighRisk,
    GeneralPurposeModel,
    Transparency,
    Result,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Unknown check item '{item_id}' in category {category:?}")]
    UnknownItem { category: Category, item_id: String },

    #[error("Action not allowed in step {step:?}")]
    InvalidStep { step: WizardStep },

    #[error("A research request is already in flight")]
    ResearchInFlight,

    #[error("A submission is already in flight")]
    SubmitInFlight,
}

/// One assessment session
#[derive(Debug, Clone)]
pub struct WizardSession {
    step: WizardStep,
    answers: AnswerSet,
    result: Option<ClassificationResult>,
    researching: bool,
    submitting: bool,
    had_prior_answers: bool,
}

impl WizardSession {
    /// Fresh session starting at the intro step
    pub fn new() -> Self {
        Self {
            step: WizardStep::Intro,
            answers: AnswerSet::default(),
            result: None,
            researching: false,
            submitting: false,
            had_prior_answers: false,
        }
    }

    /// Session for a system that may carry previously saved answers.
    /// Non-empty stored answers skip the intro and land on the first
    /// question step pre-populated; the user can still revisit and edit
    /// every category before finalizing.
    pub fn resume(prior: Option<AnswerSet>) -> Self {
        match prior {
            Some(answers) if !answers.is_empty() => Self {
                step: WizardStep::Prohibited,
                answers,
                result: None,
                researching: false,
                submitting: false,
                had_prior_answers: true,
            },
            _ => Self::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    pub fn had_prior_answers(&self) -> bool {
        self.had_prior_answers
    }

    /// Skip the research offer and go straight to manual entry. Refused
    /// while a research call is outstanding; its completion is the only
    /// transition out of the intro step once one has started.
    pub fn skip_intro(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Intro {
            return Err(WizardError::InvalidStep { step: self.step });
        }
        if self.researching {
            return Err(WizardError::ResearchInFlight);
        }
        self.step = WizardStep::Prohibited;
        Ok(())
    }

    /// Mark a research call as in flight. Only one at a time, only from
    /// the intro step.
    pub fn begin_research(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Intro {
            return Err(WizardError::InvalidStep { step: self.step });
        }
        if self.researching {
            return Err(WizardError::ResearchInFlight);
        }
        self.researching = true;
        Ok(())
    }

    /// Finish a research call and advance to the first question step.
    /// `None` means the call failed or returned nothing; progression is
    /// never blocked by a failed pre-fill.
    pub fn complete_research(&mut self, prefill: Option<AnswerPrefill>) {
        if let Some(prefill) = prefill {
            self.answers.apply_prefill(prefill);
        }
        self.researching = false;
        self.step = WizardStep::Prohibited;
    }

    /// Record one answer. Valid in any question step; the item id must
    /// exist in the catalog for the given category.
    pub fn answer(
        &mut self,
        category: Category,
        item_id: &str,
        value: bool,
    ) -> Result<(), WizardError> {
        match self.step {
            WizardStep::Prohibited
            | WizardStep::HighRisk
            | WizardStep::GeneralPurposeModel
            | WizardStep::Transparency => {}
            step => return Err(WizardError::InvalidStep { step }),
        }

        let unknown = || WizardError::UnknownItem {
            category,
            item_id: item_id.to_string(),
        };

        match category {
            Category::Prohibited => {
                catalog::prohibited_check(item_id).ok_or_else(unknown)?;
                self.answers.set_prohibited(item_id, value);
            }
            Category::HighRisk => {
                catalog::high_risk_category(item_id).ok_or_else(unknown)?;
                self.answers.set_high_risk(item_id, value);
            }
            Category::GeneralPurposeModel => {
                let check = catalog::gpai_check(item_id).ok_or_else(unknown)?;
                if check.id == catalog::GPAI_CHECK.id {
                    self.answers.set_is_general_purpose(value);
                } else {
                    self.answers.set_has_systemic_risk(value);
                }
            }
            Category::Transparency => {
                catalog::transparency_check(item_id).ok_or_else(unknown)?;
                self.answers.set_transparency(item_id, value);
            }
        }

        Ok(())
    }

    /// Advance one question step. Submission from the last question step
    /// is explicit, never an implicit `next`.
    pub fn next(&mut self) -> Result<(), WizardError> {
        self.step = match self.step {
            WizardStep::Prohibited => WizardStep::HighRisk,
            WizardStep::HighRisk => WizardStep::GeneralPurposeModel,
            WizardStep::GeneralPurposeModel => WizardStep::Transparency,
            step => return Err(WizardError::InvalidStep { step }),
        };
        Ok(())
    }

    /// Go back one question step. Never clears entered answers.
    pub fn back(&mut self) -> Result<(), WizardError> {
        self.step = match self.step {
            WizardStep::HighRisk => WizardStep::Prohibited,
            WizardStep::GeneralPurposeModel => WizardStep::HighRisk,
            WizardStep::Transparency => WizardStep::GeneralPurposeModel,
            step => return Err(WizardError::InvalidStep { step }),
        };
        Ok(())
    }

    /// Run the classifier and mark a submission in flight. The caller
    /// persists the returned result and then reports back with
    /// `complete_submit` or `fail_submit`.
    pub fn begin_submit(&mut self) -> Result<ClassificationResult, WizardError> {
        if self.step != WizardStep::Transparency {
            return Err(WizardError::InvalidStep { step: self.step });
        }
        if self.submitting {
            return Err(WizardError::SubmitInFlight);
        }
        self.submitting = true;
        Ok(classifier::classify(&self.answers))
    }

    /// Persistence succeeded: store the result and advance to the result
    /// step. The stored result is immutable for the session.
    pub fn complete_submit(&mut self, result: ClassificationResult) {
        self.result = Some(result);
        self.submitting = false;
        self.step = WizardStep::Result;
    }

    /// Persistence failed: stay on the last question step with all
    /// answers intact so the user can retry without re-entering data.
    pub fn fail_submit(&mut self) {
        self.submitting = false;
    }

    /// Discard the answers and result and start a fresh pass from the
    /// first question step. The only data-resetting transition.
    pub fn retry(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Result {
            return Err(WizardError::InvalidStep { step: self.step });
        }
        self.answers = AnswerSet::default();
        self.result = None;
        self.step = WizardStep::Prohibited;
        Ok(())
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::answers::FlagMap;
    use crate::model::classification::RiskClass;

    fn flags(entries: &[(&str, bool)]) -> FlagMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn walk_to_transparency(session: &mut WizardSession) {
        session.skip_intro().unwrap();
        session.next().unwrap();
        session.next().unwrap();
        session.next().unwrap();
        assert_eq!(session.step(), WizardStep::Transparency);
    }

    fn submit(session: &mut WizardSession) -> ClassificationResult {
        let result = session.begin_submit().unwrap();
        session.complete_submit(result.clone());
        result
    }

    #[test]
    fn test_linear_forward_and_back() {
        let mut session = WizardSession::new();
        assert_eq!(session.step(), WizardStep::Intro);
        session.skip_intro().unwrap();
        assert_eq!(session.step(), WizardStep::Prohibited);

        // Back from the first question step is not a transition
        assert!(matches!(
            session.back(),
            Err(WizardError::InvalidStep { .. })
        ));

        session.next().unwrap();
        session.next().unwrap();
        session.next().unwrap();
        assert_eq!(session.step(), WizardStep::Transparency);

        // Past the last question step only submit advances
        assert!(matches!(
            session.next(),
            Err(WizardError::InvalidStep { .. })
        ));

        session.back().unwrap();
        assert_eq!(session.step(), WizardStep::GeneralPurposeModel);
    }

    #[test]
    fn test_back_preserves_answers() {
        let mut session = WizardSession::new();
        session.skip_intro().unwrap();
        session
            .answer(Category::Prohibited, "subliminal", true)
            .unwrap();
        session.next().unwrap();
        session.back().unwrap();
        assert_eq!(session.answers().prohibited.get("subliminal"), Some(&true));
    }

    #[test]
    fn test_answer_validates_item_id() {
        let mut session = WizardSession::new();
        session.skip_intro().unwrap();
        assert_eq!(
            session.answer(Category::Prohibited, "employment", true),
            Err(WizardError::UnknownItem {
                category: Category::Prohibited,
                item_id: "employment".to_string(),
            })
        );
        // Answering a later category while on an earlier step is allowed
        session
            .answer(Category::Transparency, "direct_interaction", true)
            .unwrap();
    }

    #[test]
    fn test_gpai_answers_route_to_fields() {
        let mut session = WizardSession::new();
        session.skip_intro().unwrap();
        session
            .answer(Category::GeneralPurposeModel, "is_general_purpose", true)
            .unwrap();
        session
            .answer(Category::GeneralPurposeModel, "has_systemic_risk", true)
            .unwrap();
        assert_eq!(
            session.answers().general_purpose.is_general_purpose,
            Some(true)
        );
        assert_eq!(
            session.answers().general_purpose.has_systemic_risk,
            Some(true)
        );
    }

    #[test]
    fn test_submit_only_from_transparency() {
        let mut session = WizardSession::new();
        session.skip_intro().unwrap();
        assert!(matches!(
            session.begin_submit(),
            Err(WizardError::InvalidStep { .. })
        ));
    }

    #[test]
    fn test_submit_guard_blocks_duplicates() {
        let mut session = WizardSession::new();
        walk_to_transparency(&mut session);
        let _pending = session.begin_submit().unwrap();
        assert_eq!(session.begin_submit(), Err(WizardError::SubmitInFlight));
    }

    #[test]
    fn test_failed_submit_preserves_state() {
        let mut session = WizardSession::new();
        session.skip_intro().unwrap();
        session
            .answer(Category::Prohibited, "subliminal", true)
            .unwrap();
        session.next().unwrap();
        session.next().unwrap();
        session.next().unwrap();

        let _pending = session.begin_submit().unwrap();
        session.fail_submit();

        // Still on the last question step, answers intact, no result
        assert_eq!(session.step(), WizardStep::Transparency);
        assert_eq!(session.answers().prohibited.get("subliminal"), Some(&true));
        assert!(session.result().is_none());

        // And the submission can be retried
        let result = submit(&mut session);
        assert_eq!(result.verdict, RiskClass::Prohibited);
        assert_eq!(session.step(), WizardStep::Result);
    }

    #[test]
    fn test_result_stored_immutably() {
        let mut session = WizardSession::new();
        session.skip_intro().unwrap();
        session
            .answer(Category::HighRisk, "employment", true)
            .unwrap();
        session.next().unwrap();
        session.next().unwrap();
        session.next().unwrap();
        let result = submit(&mut session);
        assert_eq!(session.result(), Some(&result));
    }

    #[test]
    fn test_retry_resets_answers_and_result() {
        let mut session = WizardSession::new();
        session.skip_intro().unwrap();
        session
            .answer(Category::Prohibited, "biometric_public", true)
            .unwrap();
        session.next().unwrap();
        session.next().unwrap();
        session.next().unwrap();
        let result = submit(&mut session);
        assert_eq!(result.verdict, RiskClass::Prohibited);

        session.retry().unwrap();
        assert_eq!(session.step(), WizardStep::Prohibited);
        assert!(session.answers().is_empty());
        assert!(session.result().is_none());

        // Retry is only valid from the result step
        assert!(matches!(
            session.retry(),
            Err(WizardError::InvalidStep { .. })
        ));
    }

    #[test]
    fn test_resume_with_prior_answers_skips_intro() {
        let mut prior = AnswerSet::default();
        prior.set_high_risk("education", true);

        let session = WizardSession::resume(Some(prior));
        assert_eq!(session.step(), WizardStep::Prohibited);
        assert!(session.had_prior_answers());
        assert_eq!(session.answers().high_risk.get("education"), Some(&true));
    }

    #[test]
    fn test_resume_with_empty_answers_starts_at_intro() {
        let session = WizardSession::resume(Some(AnswerSet::default()));
        assert_eq!(session.step(), WizardStep::Intro);
        assert!(!session.had_prior_answers());

        let session = WizardSession::resume(None);
        assert_eq!(session.step(), WizardStep::Intro);
    }

    #[test]
    fn test_research_single_flight_and_graceful_failure() {
        let mut session = WizardSession::new();
        session.begin_research().unwrap();
        assert_eq!(session.begin_research(), Err(WizardError::ResearchInFlight));

        // Failure completes with no prefill and still advances
        session.complete_research(None);
        assert_eq!(session.step(), WizardStep::Prohibited);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_research_prefill_populates_answers() {
        let mut session = WizardSession::new();
        session.begin_research().unwrap();
        session.complete_research(Some(AnswerPrefill {
            prohibited: None,
            high_risk: Some(flags(&[("employment", true), ("education", false)])),
            general_purpose: None,
            transparency: None,
        }));
        assert_eq!(session.step(), WizardStep::Prohibited);
        assert_eq!(session.answers().high_risk.get("employment"), Some(&true));
    }

    #[test]
    fn test_skip_blocked_while_research_in_flight() {
        let mut session = WizardSession::new();
        session.begin_research().unwrap();

        // Leaving the intro by hand mid-research would let a late
        // completion drag the session back and clobber entered answers
        assert_eq!(session.skip_intro(), Err(WizardError::ResearchInFlight));
        assert_eq!(session.step(), WizardStep::Intro);

        session.complete_research(None);
        assert_eq!(session.step(), WizardStep::Prohibited);
        session.skip_intro().unwrap_err();
        session
            .answer(Category::HighRisk, "employment", true)
            .unwrap();
        session.next().unwrap();
        assert_eq!(session.step(), WizardStep::HighRisk);
        assert_eq!(session.answers().high_risk.get("employment"), Some(&true));
    }

    #[test]
    fn test_research_only_from_intro() {
        let mut session = WizardSession::new();
        session.skip_intro().unwrap();
        assert!(matches!(
            session.begin_research(),
            Err(WizardError::InvalidStep { .. })
        ));
    }
}
