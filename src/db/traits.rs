//! Database abstraction traits
//!
//! This module provides the `BookStore` trait that the search tool reads
//! through, and `DatabaseProvider` which picks a libSQL backend (in-memory
//! SQLite, file-based SQLite, remote Turso).
//!
//! # Example
//!
//! ```rust,ignore
//! use bookwise::db::DatabaseProvider;
//!
//! // Use in-memory database (default for development/testing)
//! let store = DatabaseProvider::Memory.create_store().await?;
//!
//! // Use file-based SQLite
//! let store = DatabaseProvider::SQLite { path: "books.db".into() }.create_store().await?;
//! ```

use crate::search::BookQuery;
use crate::types::{AppError, Book, Result};
use crate::utils::toml_config::DatabaseConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Database provider configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires network access)
    #[cfg(feature = "turso")]
    Turso {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Open the store described by this provider
    pub async fn create_store(&self) -> Result<Arc<dyn BookStore>> {
        match self {
            DatabaseProvider::Memory => {
                let client = super::turso::TursoClient::new_memory().await?;
                Ok(Arc::new(client))
            }
            DatabaseProvider::SQLite { path } => {
                let client = super::turso::TursoClient::new_local(path).await?;
                Ok(Arc::new(client))
            }
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, auth_token } => {
                let client =
                    super::turso::TursoClient::new_remote(url.clone(), auth_token.clone()).await?;
                Ok(Arc::new(client))
            }
        }
    }

    /// Resolve from the `[database]` config section.
    ///
    /// A Turso URL env var wins when the `turso` feature is enabled; otherwise
    /// `url` is a file path, with `:memory:` (or empty) meaning in-memory.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        #[cfg(feature = "turso")]
        {
            if let Some(url_env) = &config.turso_url_env {
                let url = std::env::var(url_env).map_err(|_| {
                    AppError::Config(format!("Environment variable '{}' is not set", url_env))
                })?;
                let token = match &config.turso_token_env {
                    Some(token_env) => std::env::var(token_env).map_err(|_| {
                        AppError::Config(format!(
                            "Environment variable '{}' is not set",
                            token_env
                        ))
                    })?,
                    None => String::new(),
                };
                return Ok(DatabaseProvider::Turso {
                    url,
                    auth_token: token,
                });
            }
        }

        if cfg!(not(feature = "turso")) && config.turso_url_env.is_some() {
            return Err(AppError::Config(
                "database.turso_url_env is set but the `turso` feature is disabled".to_string(),
            ));
        }

        let path = config.url.trim();
        if path.is_empty() || path == ":memory:" {
            Ok(DatabaseProvider::Memory)
        } else {
            Ok(DatabaseProvider::SQLite {
                path: path.to_string(),
            })
        }
    }
}

/// Read access to the `btable` book table.
///
/// Handed to the search tool explicitly so tests and embedders can swap in
/// their own storage.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Execute a search statement produced by the query builder
    async fn search_books(&self, query: &BookQuery) -> Result<Vec<Book>>;

    /// Add a book (used for seeding local databases)
    async fn insert_book(&self, book: &Book) -> Result<()>;

    /// Number of rows in `btable`
    async fn count_books(&self) -> Result<u64>;
}
