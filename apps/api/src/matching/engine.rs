//! Match Engine — scores a skill list against every catalog vector and
//! computes per-job skill gaps.
//!
//! Ranking is rank-then-filter: the global top `top_n` by similarity are taken
//! first, and only then is `min_similarity` applied. A job above the threshold
//! but outside the top `top_n` is never returned.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::CatalogIndex;
use crate::errors::EngineError;
use crate::matching::models::{
    lowercase_set, missing_from, round2, to_percentage, RecommendationResult, SkillGapReport,
};

#[derive(Debug, Clone)]
pub struct MatchEngine {
    index: Arc<CatalogIndex>,
}

fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

impl MatchEngine {
    pub fn new(index: Arc<CatalogIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn recommend(
        &self,
        query_skills: &[String],
        top_n: usize,
        min_similarity: f64,
    ) -> Result<Vec<RecommendationResult>, EngineError> {
        if top_n == 0 {
            return Err(EngineError::InvalidInput(
                "top_n must be a positive integer".to_string(),
            ));
        }
        if query_skills.is_empty() {
            warn!("No user skills provided for recommendation");
            return Ok(Vec::new());
        }

        let query_text = query_skills.join(" ").to_lowercase();
        let query = self.index.project(&query_text);

        let mut scored: Vec<(usize, f64)> = self
            .index
            .entries()
            .enumerate()
            .map(|(idx, (_, vector))| (idx, query.cosine(vector)))
            .collect();
        // stable: ties keep catalog order
        scored.sort_by(|a, b| by_score_desc(a.1, b.1));
        scored.truncate(top_n);

        let user_lower = lowercase_set(query_skills);

        let mut results: Vec<RecommendationResult> = scored
            .into_iter()
            .filter(|(_, score)| *score >= min_similarity)
            .map(|(idx, score)| {
                let job = self.index.job(idx);
                let missing_skills = missing_from(&job.required_skills, &user_lower);
                RecommendationResult {
                    job_id: job.job_id.clone(),
                    job_title: job.job_title.clone(),
                    match_score: score,
                    match_percentage: to_percentage(score),
                    required_skills: job.required_skills.clone(),
                    user_skills: query_skills.to_vec(),
                    skill_gap_count: missing_skills.len(),
                    missing_skills,
                }
            })
            .collect();

        results.sort_by(|a, b| by_score_desc(a.match_score, b.match_score));

        info!("Generated {} job recommendations", results.len());
        Ok(results)
    }

    pub fn skill_gap(
        &self,
        query_skills: &[String],
        job_id: &str,
    ) -> Result<SkillGapReport, EngineError> {
        let job = self
            .index
            .get_job_by_id(job_id)
            .ok_or_else(|| EngineError::NotFound(job_id.to_string()))?;

        let user_lower = lowercase_set(query_skills);
        let required = &job.required_skills;
        let matching_skills: Vec<String> = required
            .iter()
            .filter(|skill| user_lower.contains(skill.as_str()))
            .cloned()
            .collect();
        let missing_skills = missing_from(required, &user_lower);

        let match_percentage = if required.is_empty() {
            0.0
        } else {
            round2(matching_skills.len() as f64 / required.len() as f64 * 100.0)
        };

        Ok(SkillGapReport {
            required_skills: required.clone(),
            user_skills: query_skills.to_vec(),
            matching_skills,
            skill_gap_count: missing_skills.len(),
            missing_skills,
            match_percentage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::JobPosting;
    use crate::catalog::tests::posting;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn engine(jobs: Vec<JobPosting>) -> MatchEngine {
        MatchEngine::new(Arc::new(CatalogIndex::build(jobs).unwrap()))
    }

    fn two_job_engine() -> MatchEngine {
        engine(vec![
            posting("J1", "Backend Engineer", "python django sql"),
            posting("J2", "Data Scientist", "python pandas numpy"),
        ])
    }

    fn wide_engine() -> MatchEngine {
        engine(vec![
            posting("J1", "Backend Engineer", "python django sql"),
            posting("J2", "Data Scientist", "python pandas numpy"),
            posting("J3", "Frontend Engineer", "javascript react css"),
            posting("J4", "DevOps Engineer", "docker kubernetes terraform"),
            posting("J5", "ML Engineer", "python pytorch docker"),
            posting("J6", "Web Developer", "javascript django html"),
        ])
    }

    #[test]
    fn test_backend_ranks_above_data_scientist() {
        let results = two_job_engine()
            .recommend(&skills(&["python", "django"]), 2, 0.0)
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].job_id, "J1");
        assert_eq!(results[1].job_id, "J2");
        assert_eq!(results[0].missing_skills, vec!["sql"]);
        assert_eq!(results[0].skill_gap_count, 1);
    }

    #[test]
    fn test_results_bounded_sorted_and_in_range() {
        let engine = wide_engine();
        for top_n in 1..=8 {
            let results = engine
                .recommend(&skills(&["Python", "Docker", "react"]), top_n, 0.0)
                .unwrap();
            assert!(results.len() <= top_n);
            for r in &results {
                assert!((0.0..=1.0).contains(&r.match_score));
                assert_eq!(r.match_percentage, round2(r.match_score * 100.0));
            }
            for pair in results.windows(2) {
                assert!(pair[0].match_score >= pair[1].match_score);
            }
        }
    }

    #[test]
    fn test_empty_skills_returns_empty() {
        let results = two_job_engine().recommend(&[], 5, 0.1).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_zero_top_n_is_invalid_input() {
        let err = two_job_engine()
            .recommend(&skills(&["python"]), 0, 0.1)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_threshold_one_excludes_partial_matches() {
        let results = wide_engine()
            .recommend(&skills(&["python", "django"]), 10, 1.0)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_unseen_skills_score_zero_and_filtered() {
        let engine = two_job_engine();
        let results = engine.recommend(&skills(&["cobol"]), 2, 0.1).unwrap();
        assert!(results.is_empty());

        let unfiltered = engine.recommend(&skills(&["cobol"]), 2, 0.0).unwrap();
        assert_eq!(unfiltered.len(), 2);
        assert!(unfiltered.iter().all(|r| r.match_score == 0.0));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let results = wide_engine()
            .recommend(&skills(&["cobol"]), 6, 0.0)
            .unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.job_id.as_str()).collect();
        assert_eq!(ids, vec!["J1", "J2", "J3", "J4", "J5", "J6"]);
    }

    #[test]
    fn test_top_n_window_truncates_results_above_threshold() {
        let engine = wide_engine();
        let query = skills(&["python"]);
        let all = engine.recommend(&query, 6, 0.0).unwrap();
        let above: Vec<_> = all.iter().filter(|r| r.match_score >= 0.01).collect();
        assert!(above.len() >= 2);

        let windowed = engine.recommend(&query, 1, 0.01).unwrap();
        assert_eq!(windowed.len(), 1);
        assert_eq!(windowed[0].job_id, all[0].job_id);
    }

    #[test]
    fn test_user_skills_case_preserved() {
        let results = two_job_engine()
            .recommend(&skills(&["PYTHON", "Django"]), 1, 0.0)
            .unwrap();
        assert_eq!(results[0].user_skills, vec!["PYTHON", "Django"]);
        assert_eq!(results[0].missing_skills, vec!["sql"]);
    }

    #[test]
    fn test_skill_gap_scenario() {
        let report = two_job_engine()
            .skill_gap(&skills(&["python", "pandas"]), "J2")
            .unwrap();
        assert!(report.matching_skills.contains(&"python".to_string()));
        assert!(report.matching_skills.contains(&"pandas".to_string()));
        assert_eq!(report.missing_skills, vec!["numpy"]);
        assert_eq!(report.match_percentage, 66.67);
        assert_eq!(report.skill_gap_count, 1);
    }

    #[test]
    fn test_skill_gap_unknown_job_not_found() {
        let err = two_job_engine()
            .skill_gap(&skills(&["python"]), "J404")
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound(id) if id == "J404"));
    }

    #[test]
    fn test_skill_gap_full_required_skills_has_no_gap() {
        let engine = two_job_engine();
        let required = engine.index().get_job_by_id("J1").unwrap().required_skills.clone();
        let report = engine.skill_gap(&required, "J1").unwrap();
        assert!(report.missing_skills.is_empty());
        assert_eq!(report.skill_gap_count, 0);
        assert_eq!(report.match_percentage, 100.0);
    }

    #[test]
    fn test_skill_gap_empty_required_skills() {
        let engine = engine(vec![
            posting("J9", "Generalist", "   "),
            posting("J1", "Backend Engineer", "python"),
        ]);

        let report = engine.skill_gap(&skills(&["python"]), "J9").unwrap();
        assert_eq!(report.match_percentage, 0.0);
        assert_eq!(report.skill_gap_count, 0);
    }
}
