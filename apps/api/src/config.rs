use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_path: String,
    pub min_similarity: f64,
    pub default_top_n: usize,
    /// History persistence is disabled when unset.
    pub database_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let min_similarity = match lookup("MIN_SIMILARITY_THRESHOLD") {
            Some(raw) => raw
                .parse::<f64>()
                .context("MIN_SIMILARITY_THRESHOLD must be a number")?,
            None => 0.1,
        };
        if !(0.0..=1.0).contains(&min_similarity) {
            bail!("MIN_SIMILARITY_THRESHOLD must be between 0 and 1, got {min_similarity}");
        }

        let default_top_n = match lookup("DEFAULT_TOP_N") {
            Some(raw) => raw
                .parse::<usize>()
                .context("DEFAULT_TOP_N must be a positive integer")?,
            None => 10,
        };
        if default_top_n == 0 {
            bail!("DEFAULT_TOP_N must be greater than zero");
        }

        Ok(Config {
            dataset_path: lookup("DATASET_PATH").unwrap_or_else(|| "dataset/jobs.csv".to_string()),
            min_similarity,
            default_top_n,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.dataset_path, "dataset/jobs.csv");
        assert!((config.min_similarity - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.default_top_n, 10);
        assert!(config.database_url.is_none());
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        assert!(config_from(&[("MIN_SIMILARITY_THRESHOLD", "1.5")]).is_err());
        assert!(config_from(&[("MIN_SIMILARITY_THRESHOLD", "abc")]).is_err());
    }

    #[test]
    fn test_zero_top_n_rejected() {
        assert!(config_from(&[("DEFAULT_TOP_N", "0")]).is_err());
    }

    #[test]
    fn test_cors_origins_split_and_trimmed() {
        let config =
            config_from(&[("CORS_ORIGINS", "http://localhost:3000, http://localhost:5173,")])
                .unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_blank_database_url_disables_history() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }
}
