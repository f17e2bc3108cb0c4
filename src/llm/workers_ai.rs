use crate::llm::client::{InferenceOutput, LLMClient};
use crate::types::{AppError, ChatMessage, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Cloudflare Workers AI text generation over the REST API.
///
/// `POST {api_base}/accounts/{account_id}/ai/run/{model}` with a chat-style
/// `messages` body.
pub struct WorkersAiClient {
    http: reqwest::Client,
    account_id: String,
    api_token: String,
    api_base: String,
    model: String,
}

#[derive(Serialize)]
struct RunRequest<'a> {
    messages: &'a [ChatMessage],
}

/// `{ "success": bool, "errors": [...], "result": ... }`
#[derive(Debug, Deserialize)]
struct RunEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    #[serde(default)]
    result: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

impl RunEnvelope {
    fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return "no error details".to_string();
        }
        self.errors
            .iter()
            .map(|e| match e.code {
                Some(code) => format!("{} ({})", e.message, code),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl WorkersAiClient {
    pub fn new(
        account_id: String,
        api_token: String,
        api_base: String,
        model: String,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::LLM(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            account_id,
            api_token,
            api_base,
            model,
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.api_base.trim_end_matches('/'),
            self.account_id,
            self.model
        )
    }
}

#[async_trait]
impl LLMClient for WorkersAiClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<InferenceOutput> {
        let url = self.endpoint();
        debug!(model = %self.model, messages = messages.len(), "Workers AI request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&RunRequest { messages })
            .send()
            .await
            .map_err(|e| AppError::LLM(format!("Workers AI request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::LLM(format!("Failed to read Workers AI response: {}", e)))?;

        let envelope: RunEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(AppError::LLM(format!(
                    "Workers AI returned {}: {}",
                    status, body
                )));
            }
            Err(e) => {
                return Err(AppError::LLM(format!(
                    "Invalid Workers AI response: {}",
                    e
                )));
            }
        };

        if !status.is_success() || !envelope.success {
            return Err(AppError::LLM(format!(
                "Workers AI returned {}: {}",
                status,
                envelope.error_summary()
            )));
        }

        let result = envelope
            .result
            .ok_or_else(|| AppError::LLM("Workers AI response has no result".to_string()))?;

        Ok(InferenceOutput::from(result))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
