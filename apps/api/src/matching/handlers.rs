//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::catalog::models::JobPosting;
use crate::errors::{AppError, EngineError};
use crate::history::RecommendationRecord;
use crate::matching::models::{RecommendationResult, SkillGapReport};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub user_skills: Vec<String>,
    pub top_n: Option<i64>,
    /// Saves the result set to history when present.
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub user_skills: Vec<String>,
    pub total_jobs_found: usize,
    pub recommendations: Vec<RecommendationResult>,
}

#[derive(Debug, Deserialize)]
pub struct SkillGapRequest {
    pub user_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/recommend
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let engine = state.recommender.engine()?;

    if request.user_skills.is_empty() {
        return Err(AppError::Validation("User skills are required".to_string()));
    }

    let top_n = request.top_n.unwrap_or(state.config.default_top_n as i64);
    let top_n = usize::try_from(top_n).map_err(|_| {
        EngineError::InvalidInput(format!("top_n must be a positive integer, got {top_n}"))
    })?;

    let recommendations =
        engine.recommend(&request.user_skills, top_n, state.config.min_similarity)?;

    if let (Some(user_id), Some(store)) = (request.user_id, state.history.as_ref()) {
        store
            .save(user_id, &request.user_skills, &recommendations)
            .await?;
    }

    info!("Returning {} recommendations", recommendations.len());

    Ok(Json(RecommendResponse {
        user_skills: request.user_skills,
        total_jobs_found: recommendations.len(),
        recommendations,
    }))
}

/// POST /api/v1/jobs/skill-gap/:job_id
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(request): Json<SkillGapRequest>,
) -> Result<Json<SkillGapReport>, AppError> {
    let engine = state.recommender.engine()?;
    let report = engine.skill_gap(&request.user_skills, &job_id)?;
    Ok(Json(report))
}

/// GET /api/v1/jobs/:job_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobPosting>, AppError> {
    let engine = state.recommender.engine()?;
    let job = engine
        .index()
        .get_job_by_id(&job_id)
        .cloned()
        .ok_or_else(|| EngineError::NotFound(job_id))?;
    Ok(Json(job))
}

/// GET /api/v1/jobs/history?user_id=&limit=
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<RecommendationRecord>>, AppError> {
    let store = state.history.as_ref().ok_or(AppError::HistoryDisabled)?;
    let limit = params.limit.unwrap_or(10);
    if limit <= 0 {
        return Err(AppError::Validation("limit must be positive".to_string()));
    }
    let records = store.recent(params.user_id, limit).await?;
    Ok(Json(records))
}
