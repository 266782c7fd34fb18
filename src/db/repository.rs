//! Repository for AI system database operations
//!
//! This is the persistence gateway: the completed assessment write in
//! `save_assessment` happens once per finished wizard pass.

use sqlx::PgPool;
use uuid::Uuid;

use super::models::{AiSystemRow, ListSystemsQuery, PaginatedSystems};
use super::DbError;
use crate::model::{AiSystem, AnswerSet, ComplianceStatus, NewAiSystem, RiskClass};

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Repository for AI system operations
#[derive(Clone)]
pub struct AiSystemRepository {
    pool: PgPool,
}

impl AiSystemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new AI system
    pub async fn create(&self, new: NewAiSystem) -> Result<AiSystem, DbError> {
        let provider_url = new.provider_url.as_ref().map(|u| u.to_string());
        let product_url = new.product_url.as_ref().map(|u| u.to_string());

        let row: AiSystemRow = sqlx::query_as(
            r#"
            INSERT INTO ai_systems (id, name, purpose, provider_name, provider_url, product_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.purpose)
        .bind(&new.provider_name)
        .bind(&provider_url)
        .bind(&product_url)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %row.id, name = %row.name, "Registered AI system");

        row.into_domain().map_err(DbError::Serialization)
    }

    /// Get an AI system by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<AiSystem, DbError> {
        let row: AiSystemRow = sqlx::query_as(
            r#"
            SELECT * FROM ai_systems WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        row.into_domain().map_err(DbError::Serialization)
    }

    /// Store a completed assessment: raw answers, verdict, reasoning, and
    /// the derived compliance status.
    pub async fn save_assessment(
        &self,
        id: Uuid,
        answers: &AnswerSet,
        verdict: RiskClass,
        reasoning: &str,
        compliance_status: ComplianceStatus,
    ) -> Result<(), DbError> {
        let answers_json = serde_json::to_value(answers)
            .map_err(|e| DbError::Serialization(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE ai_systems SET
                assessment_answers = $2,
                risk_classification = $3,
                classification_reasoning = $4,
                compliance_status = $5,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&answers_json)
        .bind(verdict.as_str())
        .bind(reasoning)
        .bind(compliance_status.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(id.to_string()));
        }

        tracing::debug!(id = %id, verdict = %verdict, "Saved assessment");
        Ok(())
    }

    /// List AI systems with pagination and filters
    pub async fn list(&self, query: ListSystemsQuery) -> Result<PaginatedSystems, DbError> {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).min(100);
        let offset = (page - 1) * page_size;

        // Build dynamic query
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref rc) = query.risk_classification {
            params.push(rc.clone());
            conditions.push(format!("risk_classification = ${}", params.len()));
        }

        if let Some(ref cs) = query.compliance_status {
            params.push(cs.clone());
            conditions.push(format!("compliance_status = ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM ai_systems {}", where_clause);

        let total_count: i64 = {
            let mut q = sqlx::query_scalar(&count_query);
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_one(&self.pool).await?
        };

        let select_query = format!(
            r#"
            SELECT * FROM ai_systems
            {}
            ORDER BY created_at DESC
            LIMIT {} OFFSET {}
            "#,
            where_clause, page_size, offset
        );

        let rows: Vec<AiSystemRow> = {
            let mut q = sqlx::query_as(&select_query);
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_all(&self.pool).await?
        };

        let systems: Vec<AiSystem> = rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                match row.into_domain() {
                    Ok(system) => Some(system),
                    Err(e) => {
                        tracing::warn!(id = %id, error = %e, "Skipping unconvertible AI system row");
                        None
                    }
                }
            })
            .collect();

        let total_pages = ((total_count as f64) / (page_size as f64)).ceil() as u32;

        Ok(PaginatedSystems {
            systems,
            page,
            page_size,
            total_count,
            total_pages,
        })
    }
}
