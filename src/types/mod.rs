use serde::{Deserialize, Serialize};
use std::fmt;

// ============= Book Types =============

/// A row of the `btable` book table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub avg_rating: Rating,
    pub bookshelves: String,
}

/// The stored `avg_rating` cell.
///
/// SQLite keeps whatever was written, so a row may hold a number, free text
/// or nothing at all. Each renders the way it was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Number(f64),
    Text(String),
    Missing,
}

impl Rating {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Rating::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<f64> for Rating {
    fn from(value: f64) -> Self {
        Rating::Number(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Number(value) => f.write_str(&format_number(*value)),
            Rating::Text(text) => f.write_str(text),
            Rating::Missing => f.write_str("null"),
        }
    }
}

/// Render a number the way ECMAScript's `Number.prototype.toString` does:
/// `5` not `5.0`, `1e+21` not `1000000000000000000000`, `Infinity`, `NaN`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0, which prints as "0".
        return "0".to_string();
    }
    ryu_js::Buffer::new().format(value).to_string()
}

// ============= Chat Types =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Database(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::LLM(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::Config(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
