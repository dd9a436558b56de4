use crate::error::{Error, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub concurrency_limit: usize,
    pub show_progress: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "citizen_insights.db".to_string());

        let concurrency_limit = match env::var("CONCURRENCY_LIMIT") {
            Ok(raw) => parse_concurrency_limit(&raw)?,
            Err(_) => 4,
        };

        let show_progress = env::var("SHOW_PROGRESS")
            .ok()
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        Ok(Self {
            database_path,
            concurrency_limit,
            show_progress,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "citizen_insights.db".to_string(),
            concurrency_limit: 4,
            show_progress: true,
        }
    }
}

fn parse_concurrency_limit(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(Error::Config(format!(
            "CONCURRENCY_LIMIT must be a positive integer, got {:?}",
            raw
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub concurrency_limit: usize,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            concurrency_limit: config.concurrency_limit,
            show_progress: config.show_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_concurrency_limit() {
        assert_eq!(parse_concurrency_limit("8").unwrap(), 8);
        assert_eq!(parse_concurrency_limit(" 2 ").unwrap(), 2);
        assert!(matches!(parse_concurrency_limit("0"), Err(Error::Config(_))));
        assert!(matches!(parse_concurrency_limit("many"), Err(Error::Config(_))));
    }

    #[test]
    fn test_pipeline_config_from_config() {
        let config = Config {
            database_path: ":memory:".to_string(),
            concurrency_limit: 3,
            show_progress: false,
        };
        let pipeline = PipelineConfig::from(&config);
        assert_eq!(pipeline.concurrency_limit, 3);
        assert!(!pipeline.show_progress);
    }
}
