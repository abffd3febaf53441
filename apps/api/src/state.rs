use std::sync::Arc;

use crate::config::Config;
use crate::history::RecommendationStore;
use crate::matching::RecommenderStatus;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup; never rebuilt.
    pub recommender: RecommenderStatus,
    /// `None` when DATABASE_URL is unset.
    pub history: Option<Arc<dyn RecommendationStore>>,
}
