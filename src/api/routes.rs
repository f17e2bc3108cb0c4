use crate::api::handlers;
use crate::mcp::sse::MESSAGE_PATH;
use crate::AppState;
use axum::{routing::get, Router};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the full HTTP surface: legacy SSE, streamable HTTP at `/mcp`, and a
/// plain-text 404 for everything else.
///
/// Both SSE paths accept both methods: `GET` opens a stream, `POST` delivers
/// a message to the session named by `sessionId`.
pub fn create_router(state: AppState) -> Router {
    let server = state.mcp_server();
    let mcp_service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    Router::new()
        .route(
            "/sse",
            get(handlers::sse::open_stream).post(handlers::sse::post_message),
        )
        .route(
            MESSAGE_PATH,
            get(handlers::sse::open_stream).post(handlers::sse::post_message),
        )
        .route_service("/mcp", mcp_service)
        .fallback(handlers::not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
