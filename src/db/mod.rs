//! Database access for the book table.
//!
//! - **Turso/SQLite**: the `btable` relational table read by `searchBooks`
//!
//! Remote Turso databases are enabled via the `turso` Cargo feature:
//! ```toml
//! bookwise-server = { version = "*", features = ["turso"] }
//! ```

#![allow(missing_docs)]

pub mod traits;
pub mod turso;

pub use traits::{BookStore, DatabaseProvider};
pub use turso::TursoClient;
