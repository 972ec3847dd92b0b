use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

pub const API_KEY_VAR: &str = "API_KEY";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Endpoint settings. Both keys are optional in the YAML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })?;
        Ok(config)
    }

    /// Command line values win over whatever the file (or the defaults) said.
    pub fn with_overrides(mut self, api_base: Option<String>, model: Option<String>) -> Self {
        if let Some(api_base) = api_base {
            self.api_base = api_base;
        }
        if let Some(model) = model {
            self.model = model;
        }
        self
    }
}

/// Load `KEY=VALUE` lines into the process environment. Variables that are
/// already set are left alone.
pub fn load_env_file(path: &str) -> Result<(), ConfigError> {
    dotenvy::from_path(Path::new(path)).map_err(|source| ConfigError::EnvFile {
        path: path.to_string(),
        source,
    })
}

pub fn api_key_from(value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(ConfigError::MissingApiKey),
    }
}

pub fn api_key() -> Result<String, ConfigError> {
    api_key_from(std::env::var(API_KEY_VAR).ok())
}
