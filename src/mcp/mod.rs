//! Model Context Protocol server
//!
//! - [`server`] - the tool router (`add`, `calculate`, `searchBooks`) and stdio entry
//! - [`sse`] - session table and plumbing for the legacy SSE transport
//!
//! The streamable HTTP endpoint is mounted by [`crate::api::routes`].

pub mod server;
pub mod sse;

pub use server::BookwiseMcpServer;
pub use sse::SseSessions;
