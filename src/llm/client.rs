//! LLM Client abstractions and provider management
//!
//! This module provides a unified interface for the inference backends used by
//! the book search tool:
//! - **Workers AI**: Cloudflare's hosted models over the REST API
//! - **Ollama**: Local LLM inference (feature `ollama`)

use crate::types::{AppError, ChatMessage, Result};
use crate::utils::toml_config::InferenceConfig;
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction
///
/// All backends implement this trait, so the search tool can be handed any of
/// them (or a mock) without changing its code.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Run one chat completion over the given conversation
    async fn chat(&self, messages: &[ChatMessage]) -> Result<InferenceOutput>;

    /// Generate with a system prompt, flattening the output to text
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        let messages = [ChatMessage::system(system), ChatMessage::user(prompt)];
        Ok(self.chat(&messages).await?.into_text())
    }

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// What a backend returned for a chat call.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceOutput {
    /// Plain generated text
    Text(String),
    /// Any non-string payload the backend answered with
    Structured(serde_json::Value),
}

impl InferenceOutput {
    /// Text as-is; structured payloads serialized to compact JSON.
    pub fn into_text(self) -> String {
        match self {
            InferenceOutput::Text(text) => text,
            InferenceOutput::Structured(value) => value.to_string(),
        }
    }
}

impl From<serde_json::Value> for InferenceOutput {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => InferenceOutput::Text(text),
            other => InferenceOutput::Structured(other),
        }
    }
}

/// Default hosted model for book summaries
pub const DEFAULT_WORKERS_AI_MODEL: &str = "@cf/meta/llama-3.3-70b-instruct-fp8-fast";

/// Default Cloudflare API base
pub const DEFAULT_WORKERS_AI_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Provider enum for runtime selection
#[derive(Debug, Clone, PartialEq)]
pub enum Provider {
    /// Cloudflare Workers AI
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::WorkersAi {
    ///     account_id: "0123abcd".to_string(),
    ///     api_token: "token".to_string(),
    ///     api_base: DEFAULT_WORKERS_AI_BASE.to_string(),
    ///     model: DEFAULT_WORKERS_AI_MODEL.to_string(),
    /// };
    /// ```
    WorkersAi {
        account_id: String,
        api_token: String,
        api_base: String,
        model: String,
    },

    /// Ollama local LLM provider
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::Ollama {
    ///     base_url: "http://localhost:11434".to_string(),
    ///     model: "llama3.2".to_string(),
    /// };
    /// ```
    Ollama { base_url: String, model: String },
}

impl Provider {
    /// Create a client instance for this provider
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the provider's
    /// feature is not compiled in.
    pub async fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            Provider::WorkersAi {
                account_id,
                api_token,
                api_base,
                model,
            } => Ok(Box::new(super::workers_ai::WorkersAiClient::new(
                account_id.clone(),
                api_token.clone(),
                api_base.clone(),
                model.clone(),
            )?)),

            #[cfg(feature = "ollama")]
            Provider::Ollama { base_url, model } => Ok(Box::new(
                super::ollama::OllamaClient::new(base_url.clone(), model.clone()).await?,
            )),

            #[cfg(not(feature = "ollama"))]
            Provider::Ollama { model, .. } => Err(AppError::LLM(format!(
                "Ollama support is not compiled in (requested model '{}'). \
                 Rebuild with `--features ollama` or use Workers AI.",
                model
            ))),
        }
    }

    /// Resolve a provider from the `[inference]` config section, reading
    /// secrets from the environment variables it names.
    pub fn from_config(config: &InferenceConfig) -> Result<Self> {
        match config {
            InferenceConfig::WorkersAi {
                account_id_env,
                api_token_env,
                api_base,
                model,
            } => Ok(Provider::WorkersAi {
                account_id: required_env(account_id_env)?,
                api_token: required_env(api_token_env)?,
                api_base: api_base.clone(),
                model: model.clone(),
            }),
            InferenceConfig::Ollama { base_url, model } => Ok(Provider::Ollama {
                base_url: base_url.clone(),
                model: model.clone(),
            }),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::WorkersAi { .. } => "Workers AI",
            Provider::Ollama { .. } => "Ollama",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::WorkersAi { model, .. } | Provider::Ollama { model, .. } => model,
        }
    }
}

fn required_env(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| AppError::Config(format!("Environment variable '{}' is not set", name)))
}
