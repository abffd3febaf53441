//! Recommendation history — pluggable store for saved recommendation sets.
//!
//! `AppState` holds an `Option<Arc<dyn RecommendationStore>>`; `None` when no
//! database is configured.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::models::RecommendationResult;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecommendationRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_skills: Vec<String>,
    pub recommendations: Json<Vec<RecommendationResult>>,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait RecommendationStore: Send + Sync {
    async fn save(
        &self,
        user_id: Uuid,
        user_skills: &[String],
        recommendations: &[RecommendationResult],
    ) -> Result<Uuid, AppError>;

    /// Most recent first.
    async fn recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<RecommendationRecord>, AppError>;
}

pub struct PgRecommendationStore {
    pool: PgPool,
}

impl PgRecommendationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationStore for PgRecommendationStore {
    async fn save(
        &self,
        user_id: Uuid,
        user_skills: &[String],
        recommendations: &[RecommendationResult],
    ) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO job_recommendations (id, user_id, user_skills, recommendations)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(user_skills)
        .bind(Json(recommendations))
        .fetch_one(&self.pool)
        .await?;

        info!("Job recommendations saved for user {user_id}");
        Ok(id)
    }

    async fn recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<RecommendationRecord>, AppError> {
        let rows = sqlx::query_as::<_, RecommendationRecord>(
            "SELECT * FROM job_recommendations WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
