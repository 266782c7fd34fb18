//! Application state and service initialization
//!
//! Centralizes service construction so handlers receive their dependencies
//! through actix's data extractors.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::repository::AiSystemRepository;
use crate::enrichment::{ResearchClient, TrainingClient};
use crate::model::Config;
use crate::service::AssessmentService;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),
}

/// Application state containing all services and shared resources
pub struct AppState {
    /// Database connection pool, shared with health checks
    pub db_pool: PgPool,
    /// AI system inventory repository
    pub repository: AiSystemRepository,
    /// Assessment wizard orchestration
    pub assessment_service: Arc<AssessmentService>,
}

impl AppState {
    /// Initialize all services and build application state
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let db_pool = crate::db::create_pool()
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        crate::db::init_schema(&db_pool)
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        let repository = AiSystemRepository::new(db_pool.clone());

        let research = ResearchClient::new(config.enrichment.clone());
        let training = TrainingClient::new(config.enrichment.base_url.as_deref());

        let assessment_service = Arc::new(AssessmentService::new(
            repository.clone(),
            research,
            training,
        ));

        Ok(Self {
            db_pool,
            repository,
            assessment_service,
        })
    }
}
