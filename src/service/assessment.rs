//! Assessment orchestration service
//!
//! Holds the live wizard sessions and drives the gateway calls around
//! them: research pre-fill at the intro step, the persistence write on
//! submission, and the optional training recommendation afterwards. Locks
//! are scoped so they are never held across an await.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::Mutex;
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::repository::AiSystemRepository;
use crate::db::DbError;
use crate::enrichment::{CourseRecommendation, ResearchClient, TrainingClient};
use crate::model::{AnswerSet, Category, ClassificationResult, ComplianceStatus, RiskClass};
use crate::service::wizard::{WizardError, WizardSession, WizardStep};

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("Assessment session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("At least one research URL is required")]
    MissingResearchUrls,

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

/// Snapshot of a session returned to API callers
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionView {
    pub session_id: Uuid,
    pub system_id: Uuid,
    pub step: WizardStep,
    pub had_prior_answers: bool,
    pub answers: AnswerSet,
    pub result: Option<ClassificationResult>,
}

/// Result of a completed submission
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmitOutcome {
    pub result: ClassificationResult,
    pub training_recommendation: Option<CourseRecommendation>,
}

struct SessionEntry {
    system_id: Uuid,
    session: WizardSession,
}

/// One live session per system: inserting a new one evicts any prior
/// session for the same system, so the table stays bounded by the number
/// of registered systems.
fn insert_session(
    sessions: &mut HashMap<Uuid, SessionEntry>,
    session_id: Uuid,
    entry: SessionEntry,
) {
    sessions.retain(|_, existing| existing.system_id != entry.system_id);
    sessions.insert(session_id, entry);
}

impl SessionEntry {
    fn view(&self, session_id: Uuid) -> SessionView {
        SessionView {
            session_id,
            system_id: self.system_id,
            step: self.session.step(),
            had_prior_answers: self.session.had_prior_answers(),
            answers: self.session.answers().clone(),
            result: self.session.result().cloned(),
        }
    }
}

/// Service coordinating wizard sessions with the persistence and
/// enrichment gateways
pub struct AssessmentService {
    repository: AiSystemRepository,
    research: ResearchClient,
    training: TrainingClient,
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
}

impl AssessmentService {
    pub fn new(
        repository: AiSystemRepository,
        research: ResearchClient,
        training: TrainingClient,
    ) -> Self {
        Self {
            repository,
            research,
            training,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Start a session for a registered system, resuming from stored
    /// answers when a previous assessment exists. Supersedes any earlier
    /// live session for the same system.
    pub async fn start(&self, system_id: Uuid) -> Result<SessionView, AssessmentError> {
        let system = self.repository.get_by_id(system_id).await?;
        let session = WizardSession::resume(system.assessment_answers);
        let session_id = Uuid::new_v4();

        tracing::info!(
            system_id = %system_id,
            session_id = %session_id,
            had_prior_answers = session.had_prior_answers(),
            "Started assessment session"
        );

        let entry = SessionEntry { system_id, session };
        let view = entry.view(session_id);

        insert_session(&mut *self.sessions.lock().await, session_id, entry);
        Ok(view)
    }

    /// Current state of a session
    pub async fn view(&self, session_id: Uuid) -> Result<SessionView, AssessmentError> {
        let sessions = self.sessions.lock().await;
        let entry = sessions
            .get(&session_id)
            .ok_or(AssessmentError::SessionNotFound(session_id))?;
        Ok(entry.view(session_id))
    }

    /// Research pre-fill from provider/product URLs. Gateway failure is
    /// non-fatal: the session still advances to manual entry with nothing
    /// populated.
    pub async fn research(
        &self,
        session_id: Uuid,
        provider_url: Option<Url>,
        product_url: Option<Url>,
    ) -> Result<SessionView, AssessmentError> {
        if provider_url.is_none() && product_url.is_none() {
            return Err(AssessmentError::MissingResearchUrls);
        }

        {
            let mut sessions = self.sessions.lock().await;
            let entry = sessions
                .get_mut(&session_id)
                .ok_or(AssessmentError::SessionNotFound(session_id))?;
            entry.session.begin_research()?;
        }

        let prefill = match self
            .research
            .analyze(provider_url.as_ref(), product_url.as_ref())
            .await
        {
            Ok(prefill) => Some(prefill),
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "Research pre-fill failed, continuing with manual entry"
                );
                None
            }
        };

        let mut sessions = self.sessions.lock().await;
        let entry = sessions
            .get_mut(&session_id)
            .ok_or(AssessmentError::SessionNotFound(session_id))?;
        entry.session.complete_research(prefill);
        Ok(entry.view(session_id))
    }

    /// Skip research and go straight to manual entry
    pub async fn skip_research(&self, session_id: Uuid) -> Result<SessionView, AssessmentError> {
        self.with_session(session_id, |session| session.skip_intro())
            .await
    }

    /// Record one answer
    pub async fn answer(
        &self,
        session_id: Uuid,
        category: Category,
        item_id: &str,
        value: bool,
    ) -> Result<SessionView, AssessmentError> {
        self.with_session(session_id, |session| session.answer(category, item_id, value))
            .await
    }

    /// Advance to the next question step
    pub async fn next(&self, session_id: Uuid) -> Result<SessionView, AssessmentError> {
        self.with_session(session_id, |session| session.next()).await
    }

    /// Go back one question step
    pub async fn back(&self, session_id: Uuid) -> Result<SessionView, AssessmentError> {
        self.with_session(session_id, |session| session.back()).await
    }

    /// Submit the assessment: classify, persist, then optionally fetch a
    /// training recommendation. A failed persistence write leaves the
    /// session on the last question step with all answers intact.
    pub async fn submit(&self, session_id: Uuid) -> Result<SubmitOutcome, AssessmentError> {
        let (system_id, result, answers) = {
            let mut sessions = self.sessions.lock().await;
            let entry = sessions
                .get_mut(&session_id)
                .ok_or(AssessmentError::SessionNotFound(session_id))?;
            let result = entry.session.begin_submit()?;
            (entry.system_id, result, entry.session.answers().clone())
        };

        let compliance_status = ComplianceStatus::from_verdict(result.verdict);

        if let Err(e) = self
            .repository
            .save_assessment(
                system_id,
                &answers,
                result.verdict,
                &result.reasoning,
                compliance_status,
            )
            .await
        {
            tracing::error!(
                system_id = %system_id,
                session_id = %session_id,
                error = %e,
                "Failed to persist assessment"
            );
            let mut sessions = self.sessions.lock().await;
            if let Some(entry) = sessions.get_mut(&session_id) {
                entry.session.fail_submit();
            }
            return Err(e.into());
        }

        let training_recommendation = self.maybe_recommend(system_id, result.verdict).await;

        {
            let mut sessions = self.sessions.lock().await;
            if let Some(entry) = sessions.get_mut(&session_id) {
                entry.session.complete_submit(result.clone());
            }
        }

        tracing::info!(
            system_id = %system_id,
            verdict = %result.verdict,
            transparency_required = result.transparency_required,
            "Assessment completed"
        );

        Ok(SubmitOutcome {
            result,
            training_recommendation,
        })
    }

    /// Discard the stored result and answers and start a fresh pass
    pub async fn retry(&self, session_id: Uuid) -> Result<SessionView, AssessmentError> {
        self.with_session(session_id, |session| session.retry()).await
    }

    /// Training recommendation for high-risk and GPAI verdicts. Failure is
    /// logged and swallowed; the result is surfaced either way.
    async fn maybe_recommend(
        &self,
        system_id: Uuid,
        verdict: RiskClass,
    ) -> Option<CourseRecommendation> {
        if !matches!(verdict, RiskClass::HighRisk | RiskClass::Gpai) {
            return None;
        }

        match self.training.recommend(system_id, verdict).await {
            Ok(recommendation) => recommendation,
            Err(e) => {
                tracing::warn!(
                    system_id = %system_id,
                    error = %e,
                    "Training recommendation failed, continuing without"
                );
                None
            }
        }
    }

    async fn with_session<F>(
        &self,
        session_id: Uuid,
        action: F,
    ) -> Result<SessionView, AssessmentError>
    where
        F: FnOnce(&mut WizardSession) -> Result<(), WizardError>,
    {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions
            .get_mut(&session_id)
            .ok_or(AssessmentError::SessionNotFound(session_id))?;
        action(&mut entry.session)?;
        Ok(entry.view(session_id))
    }
}
