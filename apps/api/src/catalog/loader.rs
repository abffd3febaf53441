//! CSV catalog source: path resolution, header check, row decoding.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::catalog::models::{CatalogRow, JobPosting};
use crate::errors::EngineError;

pub const REQUIRED_COLUMNS: [&str; 3] = ["job_id", "job_title", "skills"];

/// Candidate locations for a configured dataset path, in lookup order.
pub fn candidate_paths(configured: &str) -> Vec<PathBuf> {
    let configured = PathBuf::from(configured);
    if configured.is_absolute() {
        return vec![configured];
    }

    let mut candidates = vec![configured.clone()];
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(&configured));
    }
    if let Ok(exe) = std::env::current_exe() {
        // binary may run from target/<profile>/ or from apps/api
        for ancestor in exe.ancestors().skip(1).take(4) {
            candidates.push(ancestor.join(&configured));
        }
    }
    candidates.dedup();
    candidates
}

/// Returns the first existing candidate, or `DatasetLoad` naming every path tried.
pub fn resolve_path(configured: &str) -> Result<PathBuf, EngineError> {
    let candidates = candidate_paths(configured);
    candidates
        .iter()
        .find(|path| path.is_file())
        .cloned()
        .ok_or_else(|| {
            let tried: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
            EngineError::DatasetLoad(format!(
                "jobs dataset not found, tried: {}",
                tried.join(", ")
            ))
        })
}

/// Reads every row of a catalog CSV into `JobPosting`s.
pub fn load_postings(path: &Path) -> Result<Vec<JobPosting>, EngineError> {
    let file = File::open(path)
        .map_err(|e| EngineError::DatasetLoad(format!("{}: {e}", path.display())))?;
    read_postings(file, &path.display().to_string())
}

pub fn read_postings<R: std::io::Read>(
    reader: R,
    source: &str,
) -> Result<Vec<JobPosting>, EngineError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| EngineError::DatasetLoad(format!("{source}: {e}")))?
        .clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::Schema(missing));
    }

    let mut postings = Vec::new();
    for (line, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = record.map_err(|e| {
            EngineError::DatasetLoad(format!("{source}: malformed row {}: {e}", line + 1))
        })?;
        postings.push(JobPosting::from_row(row));
    }

    info!("Loaded {} jobs from {source}", postings.len());
    Ok(postings)
}
