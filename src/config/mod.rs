//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default name of the secret parameter holding the Riot API key.
pub const DEFAULT_API_KEY_PARAMETER: &str = "/rift-rewind/riot-api-key";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Riot API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiotConfig {
    /// Region used when a request does not name one
    #[serde(default = "default_region")]
    pub default_region: String,

    /// Matches fetched when a request does not give a count
    #[serde(default = "default_match_count")]
    pub default_match_count: u32,

    /// Request timeout in seconds
    #[serde(default = "default_riot_timeout")]
    pub timeout_seconds: u64,
}

fn default_region() -> String {
    "na1".to_string()
}

fn default_match_count() -> u32 {
    5
}

fn default_riot_timeout() -> u64 {
    30
}

impl Default for RiotConfig {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            default_match_count: default_match_count(),
            timeout_seconds: default_riot_timeout(),
        }
    }
}

/// AI backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Output token budget for one answer
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Timeout in seconds
    #[serde(default = "default_ai_timeout")]
    pub timeout_seconds: u64,

    /// Environment variable holding the model API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_ai_timeout() -> u64 {
    120
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_ai_timeout(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Storage bucket identifier, interpreted by the object store
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Name of the secret parameter holding the Riot API key
    #[serde(default = "default_api_key_parameter")]
    pub api_key_parameter: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub riot: RiotConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_bucket() -> String {
    "./data".to_string()
}

fn default_api_key_parameter() -> String {
    DEFAULT_API_KEY_PARAMETER.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            api_key_parameter: default_api_key_parameter(),
            log_level: default_log_level(),
            riot: RiotConfig::default(),
            ai: AiConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file if it exists, then apply
    /// environment overrides (`MATCH_DATA_BUCKET`, `RIOT_API_KEY_PARAMETER`).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides for the deployment-specific settings.
    pub fn apply_env(&mut self) {
        if let Ok(bucket) = std::env::var("MATCH_DATA_BUCKET") {
            self.bucket = bucket;
        }
        if let Ok(parameter) = std::env::var("RIOT_API_KEY_PARAMETER") {
            self.api_key_parameter = parameter;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Storage bucket must not be empty".to_string(),
            ));
        }

        if self.api_key_parameter.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "API key parameter name must not be empty".to_string(),
            ));
        }

        if !(1..=20).contains(&self.riot.default_match_count) {
            return Err(ConfigError::ValidationError(
                "Default match count must be between 1 and 20".to_string(),
            ));
        }

        if self.ai.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "AI max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
