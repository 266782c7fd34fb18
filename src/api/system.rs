//! REST API endpoints for the AI system inventory

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::db::models::ListSystemsQuery;
use crate::db::repository::AiSystemRepository;
use crate::model::NewAiSystem;

/// Query parameters for listing systems
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSystemsParams {
    /// Page number (1-indexed, default: 1)
    pub page: Option<u32>,
    /// Page size (default: 20, max: 100)
    pub page_size: Option<u32>,
    /// Filter by verdict (prohibited, high-risk, gpai, limited-risk, minimal-risk)
    pub risk_classification: Option<String>,
    /// Filter by compliance status (not-started, in-progress, compliant, non-compliant)
    pub compliance_status: Option<String>,
}

/// Register a new AI system
#[utoipa::path(
    post,
    path = "/v1/systems",
    request_body = NewAiSystem,
    responses(
        (status = 201, description = "System registered", body = crate::model::AiSystem),
        (status = 500, description = "Internal server error")
    ),
    tag = "systems"
)]
#[post("/v1/systems")]
pub async fn register_system(
    repository: web::Data<AiSystemRepository>,
    body: web::Json<NewAiSystem>,
) -> Result<HttpResponse, ApiError> {
    let new = body.into_inner();
    if new.name.trim().is_empty() {
        return Err(ApiError::BadRequest("System name is required".to_string()));
    }

    let system = repository.create(new).await?;
    tracing::info!(id = %system.id, name = %system.name, "AI system registered");
    Ok(HttpResponse::Created().json(system))
}

/// Get an AI system by ID
#[utoipa::path(
    get,
    path = "/v1/systems/{id}",
    params(("id" = Uuid, Path, description = "System ID")),
    responses(
        (status = 200, description = "System retrieved", body = crate::model::AiSystem),
        (status = 404, description = "System not found")
    ),
    tag = "systems"
)]
#[get("/v1/systems/{id}")]
pub async fn get_system(
    repository: web::Data<AiSystemRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let system = repository.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(system))
}

/// List AI systems with pagination and filters
#[utoipa::path(
    get,
    path = "/v1/systems",
    params(ListSystemsParams),
    responses(
        (status = 200, description = "Systems retrieved"),
        (status = 500, description = "Internal server error")
    ),
    tag = "systems"
)]
#[get("/v1/systems")]
pub async fn list_systems(
    repository: web::Data<AiSystemRepository>,
    query: web::Query<ListSystemsParams>,
) -> Result<HttpResponse, ApiError> {
    let db_query = ListSystemsQuery {
        page: query.page,
        page_size: query.page_size,
        risk_classification: query.risk_classification.clone(),
        compliance_status: query.compliance_status.clone(),
    };

    let paginated = repository.list(db_query).await?;
    Ok(HttpResponse::Ok().json(paginated))
}

/// Configure system routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register_system)
        .service(list_systems)
        .service(get_system);
}
