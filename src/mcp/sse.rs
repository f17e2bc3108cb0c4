//! Legacy HTTP+SSE MCP transport
//!
//! A client opens `GET /sse`, receives an `endpoint` event naming its
//! per-session POST URL, then posts JSON-RPC messages there. Server messages
//! flow back on the SSE stream as `message` events.

use crate::mcp::server::BookwiseMcpServer;
use crate::types::{AppError, Result};
use futures::SinkExt;
use rmcp::model::{ClientJsonRpcMessage, ServerJsonRpcMessage};
use rmcp::ServiceExt;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio_util::sync::PollSender;
use tracing::{debug, info, warn};

/// Path clients post their messages to
pub const MESSAGE_PATH: &str = "/sse/message";

const CHANNEL_CAPACITY: usize = 64;

/// Open sessions: session id to the inbound side of its service
pub type SseSessions = Arc<RwLock<HashMap<String, mpsc::Sender<ClientJsonRpcMessage>>>>;

pub fn new_sessions() -> SseSessions {
    Arc::new(RwLock::new(HashMap::new()))
}

/// An open session as seen by the SSE response stream.
pub struct SseSession {
    pub id: String,
    pub outbound: mpsc::Receiver<ServerJsonRpcMessage>,
    _guard: SessionGuard,
}

impl SseSession {
    /// Data of the initial `endpoint` event
    pub fn endpoint(&self) -> String {
        endpoint_path(&self.id)
    }
}

pub fn endpoint_path(session_id: &str) -> String {
    format!("{}?sessionId={}", MESSAGE_PATH, session_id)
}

/// Drops the session's inbound sender when the SSE stream goes away, which
/// ends the service task.
struct SessionGuard {
    id: String,
    sessions: SseSessions,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let id = std::mem::take(&mut self.id);
        let sessions = self.sessions.clone();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                if sessions.write().await.remove(&id).is_some() {
                    debug!(session = %id, "SSE stream closed");
                }
            });
        }
    }
}

/// Register a session and spawn the MCP service that runs it.
pub async fn open_session(sessions: &SseSessions, server: BookwiseMcpServer) -> SseSession {
    let id = uuid::Uuid::new_v4().to_string();

    let (inbound_tx, mut inbound_rx) = mpsc::channel::<ClientJsonRpcMessage>(CHANNEL_CAPACITY);
    let (outbound_tx, outbound_rx) = mpsc::channel::<ServerJsonRpcMessage>(CHANNEL_CAPACITY);

    sessions.write().await.insert(id.clone(), inbound_tx);
    info!(session = %id, "SSE session opened");

    let sink = PollSender::new(outbound_tx)
        .sink_map_err(|e| std::io::Error::other(e.to_string()));
    let stream = Box::pin(async_stream::stream! {
        while let Some(message) = inbound_rx.recv().await {
            yield message;
        }
    });

    let task_sessions = sessions.clone();
    let task_id = id.clone();
    tokio::spawn(async move {
        match server.serve((sink, stream)).await {
            Ok(running) => {
                if let Err(e) = running.waiting().await {
                    warn!(session = %task_id, error = %e, "SSE session task failed");
                }
            }
            Err(e) => warn!(session = %task_id, error = %e, "SSE session failed to initialize"),
        }

        task_sessions.write().await.remove(&task_id);
        info!(session = %task_id, "SSE session closed");
    });

    SseSession {
        id: id.clone(),
        outbound: outbound_rx,
        _guard: SessionGuard {
            id,
            sessions: sessions.clone(),
        },
    }
}

/// Hand one client message to its session's service.
pub async fn deliver(
    sessions: &SseSessions,
    session_id: &str,
    message: ClientJsonRpcMessage,
) -> Result<()> {
    let sender = sessions
        .read()
        .await
        .get(session_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    sender
        .send(message)
        .await
        .map_err(|_| AppError::NotFound("Session not found".to_string()))
}
