pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs/recommend", post(handlers::handle_recommend))
        .route(
            "/api/v1/jobs/skill-gap/:job_id",
            post(handlers::handle_skill_gap),
        )
        .route("/api/v1/jobs/history", get(handlers::handle_history))
        .route("/api/v1/jobs/:job_id", get(handlers::handle_get_job))
        .with_state(state)
}
