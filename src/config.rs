//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `job_search.api_key`
pub const API_KEY_ENV: &str = "JSEARCH_API_KEY";

const PLACEHOLDER_API_KEY: &str = "PLACEHOLDER";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub parsing: ParsingConfig,
    pub job_search: JobSearchConfig,
    pub recommendations: RecommendationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    pub max_upload_bytes: u64,
    pub raw_text_preview_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSearchConfig {
    pub base_url: String,
    pub api_host: String,
    pub api_key: Option<String>,
    pub country: String,
    pub date_posted: String,
    pub timeout_secs: u64,
    pub page_delay_ms: u64,
    pub cache_ttl_hours: i64,
    pub enable_cache: bool,
    pub cache_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub default_pages: u32,
    pub keyword_search_pages: u32,
    pub page_size: usize,
    pub forbidden_fallback_limit: usize,
    pub rate_limited_fallback_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parsing: ParsingConfig {
                max_upload_bytes: 5 * 1024 * 1024,
                raw_text_preview_chars: 1000,
            },
            job_search: JobSearchConfig {
                base_url: "https://jsearch.p.rapidapi.com/search".to_string(),
                api_host: "jsearch.p.rapidapi.com".to_string(),
                api_key: None,
                country: "IN".to_string(),
                date_posted: "month".to_string(),
                timeout_secs: 10,
                page_delay_ms: 1000,
                cache_ttl_hours: 24,
                enable_cache: true,
                cache_file: None,
            },
            recommendations: RecommendationConfig {
                default_pages: 2,
                keyword_search_pages: 2,
                page_size: 10,
                forbidden_fallback_limit: 10,
                rate_limited_fallback_limit: 5,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the config from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    /// On-disk location of the job search response cache
    pub fn cache_path(&self) -> PathBuf {
        self.job_search.cache_file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("resume-screener")
                .join("job_cache.json")
        })
    }

    /// Cache lifetime, rejecting hour counts outside chrono's range
    pub fn cache_ttl(&self) -> Result<chrono::Duration> {
        let hours = self.job_search.cache_ttl_hours;
        chrono::Duration::try_hours(hours).ok_or_else(|| {
            ScreenerError::Configuration(format!("cache_ttl_hours out of range: {}", hours))
        })
    }

    /// Resolve the job search credential once at startup.
    ///
    /// The environment wins over the config file. Empty and placeholder
    /// values count as "not configured".
    pub fn resolve_api_key(&self) -> Option<String> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        Self::usable_api_key(from_env.or_else(|| self.job_search.api_key.clone()))
    }

    fn usable_api_key(candidate: Option<String>) -> Option<String> {
        candidate
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.recommendations.page_size = 25;
        config.job_search.api_key = Some("secret".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.recommendations.page_size, 25);
        assert_eq!(loaded.job_search.api_key.as_deref(), Some("secret"));
        assert_eq!(loaded.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_invalid_config_is_configuration_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "parsing = 3").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ScreenerError::Configuration(_))));
    }

    #[test]
    fn test_cache_ttl_range() {
        let mut config = Config::default();
        assert_eq!(config.cache_ttl().unwrap(), chrono::Duration::hours(24));

        config.job_search.cache_ttl_hours = i64::MAX;
        assert!(matches!(config.cache_ttl(), Err(ScreenerError::Configuration(_))));
    }

    #[test]
    fn test_placeholder_api_key_is_not_usable() {
        assert_eq!(Config::usable_api_key(Some("PLACEHOLDER".to_string())), None);
        assert_eq!(Config::usable_api_key(Some("   ".to_string())), None);
        assert_eq!(Config::usable_api_key(None), None);
        assert_eq!(
            Config::usable_api_key(Some(" abc ".to_string())),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_defaults_match_reference_behaviour() {
        let config = Config::default();
        assert_eq!(config.parsing.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.recommendations.page_size, 10);
        assert_eq!(config.recommendations.forbidden_fallback_limit, 10);
        assert_eq!(config.recommendations.rate_limited_fallback_limit, 5);
        assert_eq!(config.job_search.cache_ttl_hours, 24);
    }
}
