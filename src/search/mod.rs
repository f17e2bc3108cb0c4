//! Book search: query classification, SQL construction and prompt shaping.
//!
//! - [`intent`] - keyword rules deriving the prompt intent and SQL text filter
//! - [`query_builder`] - parameterized `SELECT` over `btable`
//! - [`formatter`] - context block and prompt templates for the LLM
//!
//! ```ignore
//! use bookwise::search::{query_builder, SearchRequest};
//!
//! let query = query_builder::build(&SearchRequest::new("books by Tolkien").limit(3));
//! assert_eq!(query.params.len(), 1);
//! ```

pub mod formatter;
pub mod intent;
pub mod query_builder;

pub use intent::{SearchIntent, TextFilter};
pub use query_builder::{BookQuery, SearchRequest, SortKey, SqlParam};
