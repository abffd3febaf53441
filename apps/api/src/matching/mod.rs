//! Match Engine — query projection, ranking, skill-gap analysis and the HTTP handlers.

pub mod engine;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use tracing::{error, info};

use crate::catalog::CatalogIndex;
use crate::errors::AppError;
use engine::MatchEngine;

/// Outcome of the one-time startup build. `Unavailable` is permanent for the process.
#[derive(Debug, Clone)]
pub enum RecommenderStatus {
    Ready(Arc<MatchEngine>),
    Unavailable { reason: String },
}

impl RecommenderStatus {
    /// Loads the catalog at `dataset_path`. Failures are logged, not propagated.
    pub fn initialize(dataset_path: &str) -> Self {
        match CatalogIndex::load(dataset_path) {
            Ok(index) => {
                info!("Recommender ready ({} jobs)", index.len());
                RecommenderStatus::Ready(Arc::new(MatchEngine::new(Arc::new(index))))
            }
            Err(e) => {
                error!("Failed to initialize recommender: {e}");
                RecommenderStatus::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, RecommenderStatus::Ready(_))
    }

    pub fn engine(&self) -> Result<&MatchEngine, AppError> {
        match self {
            RecommenderStatus::Ready(engine) => Ok(engine),
            RecommenderStatus::Unavailable { reason } => {
                Err(AppError::ServiceUnavailable(reason.clone()))
            }
        }
    }
}
