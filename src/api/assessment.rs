//! REST API endpoints for assessment sessions and the questionnaire catalog

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::model::catalog::{
    self, Category, GPAI_CHECK, GPAI_SYSTEMIC_RISK_CHECK, HIGH_RISK_CATEGORIES, PROHIBITED_CHECKS,
    TRANSPARENCY_CHECKS,
};
use crate::service::AssessmentService;

/// Request to start an assessment session
#[derive(Debug, Deserialize, ToSchema)]
pub struct StartAssessmentRequest {
    pub system_id: Uuid,
}

/// Request to pre-fill the questionnaire from research
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResearchRequest {
    pub provider_url: Option<Url>,
    pub product_url: Option<Url>,
}

/// One answer toggle
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnswerRequest {
    pub category: Category,
    pub item_id: String,
    pub value: bool,
}

/// One catalog question as served to UI shells
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogItem {
    pub id: String,
    pub prompt: String,
    pub citation: String,
}

/// One Annex III multi-select category
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogHighRiskCategory {
    pub id: String,
    pub title: String,
    pub description: String,
    pub citation: String,
}

/// The full questionnaire catalog
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    pub prohibited: Vec<CatalogItem>,
    pub high_risk: Vec<CatalogHighRiskCategory>,
    pub general_purpose: Vec<CatalogItem>,
    pub transparency: Vec<CatalogItem>,
}

impl From<&catalog::CheckItem> for CatalogItem {
    fn from(check: &catalog::CheckItem) -> Self {
        Self {
            id: check.id.to_string(),
            prompt: check.prompt.to_string(),
            citation: check.citation.to_string(),
        }
    }
}

/// Start an assessment session for a registered system
#[utoipa::path(
    post,
    path = "/v1/assessments",
    request_body = StartAssessmentRequest,
    responses(
        (status = 201, description = "Session started", body = crate::service::SessionView),
        (status = 404, description = "System not found")
    ),
    tag = "assessments"
)]
#[post("/v1/assessments")]
pub async fn start_assessment(
    service: web::Data<AssessmentService>,
    body: web::Json<StartAssessmentRequest>,
) -> Result<HttpResponse, ApiError> {
    let view = service.start(body.system_id).await?;
    Ok(HttpResponse::Created().json(view))
}

/// Get the current state of an assessment session
#[utoipa::path(
    get,
    path = "/v1/assessments/{id}",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session state", body = crate::service::SessionView),
        (status = 404, description = "Session not found")
    ),
    tag = "assessments"
)]
#[get("/v1/assessments/{id}")]
pub async fn get_assessment(
    service: web::Data<AssessmentService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let view = service.view(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Pre-fill the questionnaire by researching the system's URLs
///
/// A failed research call is not an error: the session advances to manual
/// entry with nothing populated.
#[utoipa::path(
    post,
    path = "/v1/assessments/{id}/research",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = ResearchRequest,
    responses(
        (status = 200, description = "Session advanced, possibly pre-filled", body = crate::service::SessionView),
        (status = 400, description = "No research URL provided"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Research not allowed in current step")
    ),
    tag = "assessments"
)]
#[post("/v1/assessments/{id}/research")]
pub async fn research(
    service: web::Data<AssessmentService>,
    path: web::Path<Uuid>,
    body: web::Json<ResearchRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let view = service
        .research(path.into_inner(), body.provider_url, body.product_url)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Skip research and go straight to manual entry
#[utoipa::path(
    post,
    path = "/v1/assessments/{id}/skip-research",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session advanced", body = crate::service::SessionView),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Not at the intro step")
    ),
    tag = "assessments"
)]
#[post("/v1/assessments/{id}/skip-research")]
pub async fn skip_research(
    service: web::Data<AssessmentService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let view = service.skip_research(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Record one answer
#[utoipa::path(
    post,
    path = "/v1/assessments/{id}/answers",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = AnswerRequest,
    responses(
        (status = 200, description = "Answer recorded", body = crate::service::SessionView),
        (status = 400, description = "Unknown check item"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session is not on a question step")
    ),
    tag = "assessments"
)]
#[post("/v1/assessments/{id}/answers")]
pub async fn answer(
    service: web::Data<AssessmentService>,
    path: web::Path<Uuid>,
    body: web::Json<AnswerRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let view = service
        .answer(path.into_inner(), body.category, &body.item_id, body.value)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Advance to the next question step
#[utoipa::path(
    post,
    path = "/v1/assessments/{id}/next",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session advanced", body = crate::service::SessionView),
        (status = 404, description = "Session not found"),
        (status = 409, description = "No next step from here")
    ),
    tag = "assessments"
)]
#[post("/v1/assessments/{id}/next")]
pub async fn next_step(
    service: web::Data<AssessmentService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let view = service.next(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Go back one question step
#[utoipa::path(
    post,
    path = "/v1/assessments/{id}/back",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session moved back", body = crate::service::SessionView),
        (status = 404, description = "Session not found"),
        (status = 409, description = "No previous step from here")
    ),
    tag = "assessments"
)]
#[post("/v1/assessments/{id}/back")]
pub async fn back_step(
    service: web::Data<AssessmentService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let view = service.back(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Submit the assessment
///
/// Classifies, persists the verdict on the system, and may attach a
/// training recommendation. If the persistence write fails the session
/// stays on the last question step with all answers intact.
#[utoipa::path(
    post,
    path = "/v1/assessments/{id}/submit",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Assessment completed", body = crate::service::SubmitOutcome),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Not ready to submit or submission already in flight"),
        (status = 500, description = "Persistence failed; session preserved")
    ),
    tag = "assessments"
)]
#[post("/v1/assessments/{id}/submit")]
pub async fn submit(
    service: web::Data<AssessmentService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let outcome = service.submit(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Discard the result and answers and start a fresh pass
#[utoipa::path(
    post,
    path = "/v1/assessments/{id}/retry",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session reset", body = crate::service::SessionView),
        (status = 404, description = "Session not found"),
        (status = 409, description = "No completed assessment to retry")
    ),
    tag = "assessments"
)]
#[post("/v1/assessments/{id}/retry")]
pub async fn retry(
    service: web::Data<AssessmentService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let view = service.retry(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// The questionnaire catalog, for UI shells rendering the wizard
#[utoipa::path(
    get,
    path = "/v1/catalog",
    responses(
        (status = 200, description = "Questionnaire catalog", body = CatalogResponse)
    ),
    tag = "catalog"
)]
#[get("/v1/catalog")]
pub async fn get_catalog() -> HttpResponse {
    HttpResponse::Ok().json(CatalogResponse {
        prohibited: PROHIBITED_CHECKS.iter().map(CatalogItem::from).collect(),
        high_risk: HIGH_RISK_CATEGORIES
            .iter()
            .map(|c| CatalogHighRiskCategory {
                id: c.id.to_string(),
                title: c.title.to_string(),
                description: c.description.to_string(),
                citation: c.citation.to_string(),
            })
            .collect(),
        general_purpose: [&GPAI_CHECK, &GPAI_SYSTEMIC_RISK_CHECK]
            .into_iter()
            .map(CatalogItem::from)
            .collect(),
        transparency: TRANSPARENCY_CHECKS.iter().map(CatalogItem::from).collect(),
    })
}

/// OpenAPI documentation for the service
#[derive(OpenApi)]
#[openapi(
    paths(
        start_assessment,
        get_assessment,
        research,
        skip_research,
        answer,
        next_step,
        back_step,
        submit,
        retry,
        get_catalog,
        crate::api::system::register_system,
        crate::api::system::get_system,
        crate::api::system::list_systems,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    components(schemas(
        StartAssessmentRequest,
        ResearchRequest,
        AnswerRequest,
        CatalogItem,
        CatalogHighRiskCategory,
        CatalogResponse,
        crate::model::Category,
        crate::model::AnswerSet,
        crate::model::GeneralPurposeAnswers,
        crate::model::ClassificationResult,
        crate::model::RiskClass,
        crate::model::ComplianceStatus,
        crate::model::AiSystem,
        crate::model::NewAiSystem,
        crate::service::SessionView,
        crate::service::SubmitOutcome,
        crate::service::WizardStep,
        crate::enrichment::CourseRecommendation,
    )),
    tags(
        (name = "assessments", description = "Risk assessment wizard sessions"),
        (name = "catalog", description = "Questionnaire catalog"),
        (name = "systems", description = "AI system inventory"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;

/// Configure assessment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(start_assessment)
        .service(get_assessment)
        .service(research)
        .service(skip_research)
        .service(answer)
        .service(next_step)
        .service(back_step)
        .service(submit)
        .service(retry)
        .service(get_catalog);
}
