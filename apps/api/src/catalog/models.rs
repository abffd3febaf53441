use serde::{Deserialize, Serialize};

/// Cell value substituted for missing title/skills cells.
pub const MISSING_CELL: &str = "nan";

/// Raw CSV row. Extra columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRow {
    pub job_id: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
}

/// A single job posting, immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_id: String,
    pub job_title: String,
    /// Lowercased whitespace-split tokens of the raw skills cell.
    pub required_skills: Vec<String>,
    #[serde(skip)]
    pub combined_text: String,
}

impl JobPosting {
    pub fn from_row(row: CatalogRow) -> Self {
        let job_title = coerce_cell(row.job_title);
        let raw_skills = coerce_cell(row.skills);
        Self {
            combined_text: format!("{job_title} {raw_skills}"),
            required_skills: split_skills(&raw_skills),
            job_id: row.job_id,
            job_title,
        }
    }
}

fn coerce_cell(cell: Option<String>) -> String {
    match cell {
        Some(value) if !value.is_empty() => value,
        _ => MISSING_CELL.to_string(),
    }
}

/// Splits a space-delimited skills cell. Multi-word skills are not atomic.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, title: Option<&str>, skills: Option<&str>) -> CatalogRow {
        CatalogRow {
            job_id: id.to_string(),
            job_title: title.map(str::to_string),
            skills: skills.map(str::to_string),
        }
    }

    #[test]
    fn test_skills_split_on_whitespace_and_lowercased() {
        let job = JobPosting::from_row(row("J1", Some("Backend Engineer"), Some("Python  Django\tSQL")));
        assert_eq!(job.required_skills, vec!["python", "django", "sql"]);
        assert_eq!(job.combined_text, "Backend Engineer Python  Django\tSQL");
    }

    #[test]
    fn test_comma_is_not_a_skill_boundary() {
        assert_eq!(split_skills("machine learning,python"), vec!["machine", "learning,python"]);
    }

    #[test]
    fn test_missing_cells_coerced_to_nan() {
        let job = JobPosting::from_row(row("J2", None, Some("")));
        assert_eq!(job.job_title, "nan");
        assert_eq!(job.required_skills, vec!["nan"]);
        assert_eq!(job.combined_text, "nan nan");
    }

    #[test]
    fn test_whitespace_skills_cell_kept_as_no_skills() {
        let job = JobPosting::from_row(row("J3", Some("Generalist"), Some("   ")));
        assert!(job.required_skills.is_empty());
        assert_eq!(job.combined_text, "Generalist    ");
    }
}
