//! HTTP transport for the MCP server
//!
//! Built on Axum.
//!
//! # Endpoints
//!
//! - `GET /sse` - open a legacy SSE session; the first event is `endpoint`
//! - `POST /sse/message?sessionId=<id>` - deliver a client message (202)
//! - `/mcp` - streamable HTTP MCP endpoint
//!
//! Anything else answers `404 Not found`.

/// Request handlers.
pub mod handlers;
/// Router configuration.
pub mod routes;
