//! Configuration loading and validation

use crate::error::{ErrorContext, RepomapError, RepomapResult};
use crate::types::RepomapConfig;

use std::path::{Path, PathBuf};

impl RepomapConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> RepomapResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RepomapError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: RepomapConfig = toml::from_str(&content).map_err(|e| RepomapError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> RepomapResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| RepomapError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| RepomapError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Fill missing credentials from environment variables.
    /// Values already present in the config file win.
    pub fn with_env_credentials(mut self) -> Self {
        if self.credentials.github_token.is_none() {
            self.credentials.github_token = std::env::var("GITHUB_TOKEN").ok();
        }
        if self.credentials.ai_api_key.is_none() {
            self.credentials.ai_api_key = std::env::var("OPENAI_API_KEY")
                .or_else(|_| std::env::var("GROQ_API_KEY"))
                .ok();
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> RepomapResult<()> {
        if self.fetch.max_depth == 0 {
            return Err(RepomapError::Config {
                message: "fetch.max_depth must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set fetch.max_depth to a positive value (default 4)"),
            });
        }

        if self.fetch.max_concurrent_requests == 0 {
            return Err(RepomapError::Config {
                message: "fetch.max_concurrent_requests must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set fetch.max_concurrent_requests to a positive value"),
            });
        }

        if self.layout.max_ticks == 0 {
            return Err(RepomapError::Config {
                message: "layout.max_ticks must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set layout.max_ticks to a positive value"),
            });
        }

        if self.analysis.max_tokens == 0 {
            return Err(RepomapError::Config {
                message: "analysis.max_tokens must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set analysis.max_tokens to a positive value"),
            });
        }

        Ok(())
    }

    /// Default config file locations, checked in order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|d| d.join("repomap").join("config.toml")),
            dirs::home_dir().map(|d| d.join(".repomap").join("config.toml")),
            Some(PathBuf::from("repomap.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RepomapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fetch.max_depth, 4);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = RepomapConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: RepomapConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.fetch.max_depth, config.fetch.max_depth);
        assert_eq!(parsed.analysis.model, config.analysis.model);
    }

    #[test]
    fn config_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = RepomapConfig::default();
        config.fetch.max_depth = 2;
        config.save_to_file(&path).unwrap();

        let loaded = RepomapConfig::from_file(&path).unwrap();
        assert_eq!(loaded.fetch.max_depth, 2);
    }

    #[test]
    fn zero_depth_fails_validation() {
        let mut config = RepomapConfig::default();
        config.fetch.max_depth = 0;
        assert!(config.validate().is_err());
    }
}
