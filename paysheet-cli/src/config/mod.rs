//! Configuration
//!
//! Settings come from an optional TOML file under the user config
//! directory, overridden by environment variables (loaded from a .env
//! file in `main` when present). CLI flags override both.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::services::matching::OracleConfig;

const DEFAULT_API_VERSION: &str = "2024-02-01";

/// Top-level configuration file shape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub oracle: OracleSettings,
    #[serde(default)]
    pub compare: CompareSettings,
}

/// Azure OpenAI connection settings; all optional until the semantic
/// phase actually needs them
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OracleSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub deployment: Option<String>,
    pub api_version: Option<String>,
}

/// Default comparison behavior, overridable per run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareSettings {
    pub mode: Option<String>,
    pub tolerance: Option<f64>,
    pub name_column: Option<String>,
}

impl Config {
    /// Path of the config file, if a config directory exists
    pub fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("paysheet-recon").join("config.toml"))
    }

    /// Load the config file (when present) and apply environment
    /// overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::file_path() {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
            _ => Config::default(),
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("AZURE_OPENAI_ENDPOINT") {
            self.oracle.endpoint = Some(v);
        }
        if let Ok(v) = std::env::var("AZURE_OPENAI_API_KEY") {
            self.oracle.api_key = Some(v);
        }
        if let Ok(v) = std::env::var("AZURE_OPENAI_DEPLOYMENT") {
            self.oracle.deployment = Some(v);
        }
        if let Ok(v) = std::env::var("AZURE_OPENAI_API_VERSION") {
            self.oracle.api_version = Some(v);
        }
    }

    /// Concrete oracle settings, when endpoint, key and deployment are
    /// all present
    pub fn oracle_config(&self) -> Option<OracleConfig> {
        match (
            &self.oracle.endpoint,
            &self.oracle.api_key,
            &self.oracle.deployment,
        ) {
            (Some(endpoint), Some(api_key), Some(deployment)) => Some(OracleConfig {
                endpoint: endpoint.clone(),
                api_key: api_key.clone(),
                deployment: deployment.clone(),
                api_version: self
                    .oracle
                    .api_version
                    .clone()
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_file() {
        let content = r#"
            [oracle]
            endpoint = "https://example.openai.azure.com"
            api_key = "secret"
            deployment = "gpt-4o"

            [compare]
            mode = "strict"
            tolerance = 1.5
        "#;
        let config: Config = toml::from_str(content).unwrap();
        let oracle = config.oracle_config().unwrap();
        assert_eq!(oracle.endpoint, "https://example.openai.azure.com");
        assert_eq!(oracle.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.compare.mode.as_deref(), Some("strict"));
        assert_eq!(config.compare.tolerance, Some(1.5));
    }

    #[test]
    fn test_incomplete_oracle_settings_yield_none() {
        let config: Config = toml::from_str("[oracle]\nendpoint = \"https://x\"").unwrap();
        assert!(config.oracle_config().is_none());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.oracle_config().is_none());
        assert!(config.compare.name_column.is_none());
    }
}
