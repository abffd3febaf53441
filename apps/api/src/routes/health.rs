use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::matching::RecommenderStatus;
use crate::state::AppState;

/// GET /health
/// Returns service version and recommender readiness.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let recommender = match &state.recommender {
        RecommenderStatus::Ready(engine) => json!({
            "status": "ready",
            "jobs": engine.index().len(),
            "vocabulary_size": engine.index().vocabulary_size(),
        }),
        RecommenderStatus::Unavailable { reason } => json!({
            "status": "unavailable",
            "reason": reason,
        }),
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobmatch-api",
        "recommender": recommender,
        "history": state.history.is_some(),
    }))
}
