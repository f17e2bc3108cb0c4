use crate::mcp::sse;
use crate::types::{AppError, Result as AppResult};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use rmcp::model::ClientJsonRpcMessage;
use serde::Deserialize;
use std::convert::Infallible;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    pub session_id: String,
}

/// `GET` on either SSE path: open a session and stream its server messages.
pub async fn open_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let session = sse::open_session(&state.sse_sessions, state.mcp_server()).await;
    let endpoint = Event::default().event("endpoint").data(session.endpoint());

    let stream = async_stream::stream! {
        yield Ok(endpoint);

        let mut session = session;
        while let Some(message) = session.outbound.recv().await {
            match serde_json::to_string(&message) {
                Ok(json) => yield Ok(Event::default().event("message").data(json)),
                Err(e) => warn!(session = %session.id, error = %e, "Failed to encode server message"),
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// `POST` on either SSE path with `?sessionId=`: deliver one client message
/// to its session.
pub async fn post_message(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
    body: Bytes,
) -> AppResult<StatusCode> {
    let message: ClientJsonRpcMessage = serde_json::from_slice(&body).map_err(|e| {
        debug!(session = %query.session_id, error = %e, "Malformed client message");
        AppError::InvalidInput(format!("Invalid message: {}", e))
    })?;

    sse::deliver(&state.sse_sessions, &query.session_id, message).await?;
    Ok(StatusCode::ACCEPTED)
}
