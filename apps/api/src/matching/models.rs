use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One ranked job for a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub job_id: String,
    pub job_title: String,
    pub match_score: f64, // cosine, 0.0 – 1.0
    pub match_percentage: f64,
    pub required_skills: Vec<String>,
    pub user_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub skill_gap_count: usize,
}

/// Set comparison of a candidate's skills against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub required_skills: Vec<String>,
    pub user_skills: Vec<String>,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub match_percentage: f64,
    pub skill_gap_count: usize,
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn to_percentage(score: f64) -> f64 {
    round2(score * 100.0)
}

pub fn lowercase_set(skills: &[String]) -> HashSet<String> {
    skills.iter().map(|s| s.to_lowercase()).collect()
}

/// Required skills absent from `user_lower`, order and duplicates preserved.
pub fn missing_from(required: &[String], user_lower: &HashSet<String>) -> Vec<String> {
    required
        .iter()
        .filter(|skill| !user_lower.contains(skill.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds_to_two_decimals() {
        assert_eq!(to_percentage(0.123456), 12.35);
        assert_eq!(to_percentage(1.0), 100.0);
        assert_eq!(to_percentage(0.0), 0.0);
    }

    #[test]
    fn test_missing_is_case_insensitive() {
        let required = vec!["python".to_string(), "sql".to_string()];
        let user = lowercase_set(&["PYTHON".to_string()]);
        assert_eq!(missing_from(&required, &user), vec!["sql"]);
    }
}
