//! Catalog Index — the job table and its TF-IDF vector space, built once at startup.

pub mod loader;
pub mod models;
pub mod tokenizer;
pub mod vectorizer;

use std::collections::HashMap;

use tracing::{info, warn};

use crate::errors::EngineError;
use models::JobPosting;
use vectorizer::{SparseVector, TfidfVectorizer, MAX_FEATURES};

/// Read-only after construction; share via `Arc`.
#[derive(Debug)]
pub struct CatalogIndex {
    jobs: Vec<JobPosting>,
    vectors: Vec<SparseVector>,
    vectorizer: TfidfVectorizer,
    by_id: HashMap<String, usize>,
}

impl CatalogIndex {
    /// Resolves `dataset_path`, loads the CSV and vectorizes it.
    pub fn load(dataset_path: &str) -> Result<Self, EngineError> {
        let path = loader::resolve_path(dataset_path)?;
        info!("Loading job catalog from {}", path.display());
        let postings = loader::load_postings(&path)?;
        Self::build(postings)
    }

    pub fn build(jobs: Vec<JobPosting>) -> Result<Self, EngineError> {
        let texts: Vec<&str> = jobs.iter().map(|j| j.combined_text.as_str()).collect();
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&texts, MAX_FEATURES)?;

        let mut by_id = HashMap::with_capacity(jobs.len());
        for (idx, job) in jobs.iter().enumerate() {
            if by_id.contains_key(&job.job_id) {
                warn!("Duplicate job_id '{}' in catalog; keeping first", job.job_id);
                continue;
            }
            by_id.insert(job.job_id.clone(), idx);
        }

        info!(
            "Catalog index built: {} jobs, {} terms",
            jobs.len(),
            vectorizer.vocabulary_size()
        );

        Ok(Self {
            jobs,
            vectors,
            vectorizer,
            by_id,
        })
    }

    pub fn get_job_by_id(&self, job_id: &str) -> Option<&JobPosting> {
        self.by_id.get(job_id).map(|&idx| &self.jobs[idx])
    }

    /// Query text projected into the catalog space.
    pub fn project(&self, text: &str) -> SparseVector {
        self.vectorizer.transform(text)
    }

    /// Jobs paired with their vectors, in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (&JobPosting, &SparseVector)> + '_ {
        self.jobs.iter().zip(self.vectors.iter())
    }

    /// Posting at catalog position `idx`, as yielded by `entries`.
    pub fn job(&self, idx: usize) -> &JobPosting {
        &self.jobs[idx]
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}
