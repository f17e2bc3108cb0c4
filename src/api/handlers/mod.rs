//! API request handlers.

/// Legacy SSE transport handlers.
pub mod sse;

use crate::types::AppError;

/// Fallback for every unmatched path.
pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
