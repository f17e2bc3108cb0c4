//! # Bookwise - MCP tools for arithmetic and book search
//!
//! An MCP (Model Context Protocol) server exposing three tools:
//!
//! - `add` - sum two numbers
//! - `calculate` - add, subtract, multiply or divide two numbers
//! - `searchBooks` - query a libSQL book table and have an LLM summarize the hits
//!
//! ## Overview
//!
//! Bookwise can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `bookwise-server` binary (HTTP or stdio)
//! 2. **As a library** - Mount [`api::routes::create_router`] or call the tools directly
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use bookwise::{db::DatabaseProvider, llm::Provider, search::SearchRequest};
//! use bookwise::tools::book_search::search_books;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DatabaseProvider::SQLite { path: "books.db".into() }.create_store().await?;
//!     let llm = Provider::Ollama {
//!         base_url: "http://localhost:11434".to_string(),
//!         model: "llama3.2".to_string(),
//!     }
//!     .create_client()
//!     .await?;
//!
//!     let request = SearchRequest::new("top rated fantasy").limit(3);
//!     println!("{}", search_books(store.as_ref(), llm.as_ref(), &request).await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ollama` | Ollama local inference (default) |
//! | `turso` | Remote Turso database |
//!
//! ## Modules
//!
//! - [`api`] - HTTP transports (SSE, streamable HTTP)
//! - [`db`] - Book table access (libSQL)
//! - [`llm`] - Inference backends (Workers AI, Ollama)
//! - [`mcp`] - MCP tool router and session plumbing
//! - [`search`] - Intent detection, SQL building, prompt templates
//! - [`tools`] - Tool implementations
//! - [`types`] - Common types and error handling
//!
//! ## Configuration
//!
//! Infrastructure settings live in `bookwise.toml`; secrets are read from the
//! environment variables it names (a `.env` file is loaded at startup).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP routes and handlers.
pub mod api;
/// Command-line interface.
pub mod cli;
/// Database clients (libSQL / Turso).
pub mod db;
/// LLM provider clients and abstractions.
pub mod llm;
/// Model Context Protocol server.
pub mod mcp;
/// Book search query building and prompt formatting.
pub mod search;
/// Tool implementations.
pub mod tools;
/// Core types and errors.
pub mod types;
/// Configuration utilities (TOML).
pub mod utils;

// Re-export commonly used types
pub use db::{BookStore, DatabaseProvider, TursoClient};
pub use llm::{LLMClient, Provider};
pub use mcp::BookwiseMcpServer;
pub use types::{AppError, Result};
pub use utils::toml_config::BookwiseConfig;

use crate::mcp::SseSessions;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// TOML-based infrastructure configuration
    pub config: Arc<BookwiseConfig>,
    /// Book table
    pub store: Arc<dyn BookStore>,
    /// Inference backend used by `searchBooks`
    pub llm: Arc<dyn LLMClient>,
    /// Open legacy SSE sessions
    pub sse_sessions: SseSessions,
}

impl AppState {
    pub fn new(config: BookwiseConfig, store: Arc<dyn BookStore>, llm: Arc<dyn LLMClient>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            llm,
            sse_sessions: mcp::sse::new_sessions(),
        }
    }

    /// Open the configured store and inference backend.
    pub async fn from_config(config: BookwiseConfig) -> Result<Self> {
        let store = DatabaseProvider::from_config(&config.database)?
            .create_store()
            .await?;
        let provider = Provider::from_config(&config.inference)?;
        tracing::info!(
            provider = provider.name(),
            model = provider.model(),
            "Creating inference client"
        );
        let llm: Arc<dyn LLMClient> = Arc::from(provider.create_client().await?);

        Ok(Self::new(config, store, llm))
    }

    /// A fresh MCP server over this state's store and LLM.
    pub fn mcp_server(&self) -> BookwiseMcpServer {
        BookwiseMcpServer::new(self.store.clone(), self.llm.clone())
    }
}
