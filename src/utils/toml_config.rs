//! TOML-based configuration for Bookwise
//!
//! Infrastructure settings (listen address, database, inference backend) are
//! read from `bookwise.toml`. Secrets are never stored in the file: the file
//! names the environment variables that hold them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::llm::client::{DEFAULT_WORKERS_AI_BASE, DEFAULT_WORKERS_AI_MODEL};

/// Root configuration structure loaded from bookwise.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookwiseConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub inference: InferenceConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Local database path, or `:memory:`
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Environment variable for Turso URL (optional cloud config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turso_url_env: Option<String>,

    /// Environment variable for Turso auth token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turso_token_env: Option<String>,
}

fn default_database_url() -> String {
    ":memory:".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            turso_url_env: None,
            turso_token_env: None,
        }
    }
}

// ============= Inference Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InferenceConfig {
    WorkersAi {
        /// Environment variable containing the Cloudflare account id
        #[serde(default = "default_account_id_env")]
        account_id_env: String,
        /// Environment variable containing the API token
        #[serde(default = "default_api_token_env")]
        api_token_env: String,
        #[serde(default = "default_workers_ai_base")]
        api_base: String,
        #[serde(default = "default_workers_ai_model")]
        model: String,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        model: String,
    },
}

fn default_account_id_env() -> String {
    "CLOUDFLARE_ACCOUNT_ID".to_string()
}

fn default_api_token_env() -> String {
    "CLOUDFLARE_API_TOKEN".to_string()
}

fn default_workers_ai_base() -> String {
    DEFAULT_WORKERS_AI_BASE.to_string()
}

fn default_workers_ai_model() -> String {
    DEFAULT_WORKERS_AI_MODEL.to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig::WorkersAi {
            account_id_env: default_account_id_env(),
            api_token_env: default_api_token_env(),
            api_base: default_workers_ai_base(),
            model: default_workers_ai_model(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to render TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl From<ConfigError> for crate::types::AppError {
    fn from(err: ConfigError) -> Self {
        crate::types::AppError::Config(err.to_string())
    }
}

impl BookwiseConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Parse without validating (no environment access)
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate internal consistency and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }

        if self.database.turso_url_env.is_some() && self.database.turso_token_env.is_none() {
            return Err(ConfigError::ValidationError(
                "database.turso_url_env requires database.turso_token_env".to_string(),
            ));
        }
        if let Some(ref env) = self.database.turso_url_env {
            self.validate_env_var(env)?;
        }
        if let Some(ref env) = self.database.turso_token_env {
            self.validate_env_var(env)?;
        }

        match &self.inference {
            InferenceConfig::WorkersAi {
                account_id_env,
                api_token_env,
                model,
                ..
            } => {
                self.validate_env_var(account_id_env)?;
                self.validate_env_var(api_token_env)?;
                if model.trim().is_empty() {
                    return Err(ConfigError::ValidationError(
                        "inference.model must not be empty".to_string(),
                    ));
                }
            }
            InferenceConfig::Ollama { model, .. } => {
                if model.trim().is_empty() {
                    return Err(ConfigError::ValidationError(
                        "inference.model must not be empty".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }

    fn validate_env_var(&self, name: &str) -> Result<(), ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
        Ok(())
    }

    /// `host:port` to bind the HTTP server to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
