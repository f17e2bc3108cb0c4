//! Tool implementations exposed over MCP
//!
//! The MCP layer ([`crate::mcp`]) only deserializes arguments and wraps the
//! results; the behavior lives here so it can be called and tested directly.
//!
//! - [`calculator`](crate::tools::calculator) - `add` and `calculate`
//! - [`book_search`](crate::tools::book_search) - `searchBooks` pipeline
//!
//! ```ignore
//! use bookwise::tools::calculator::{calculate_text, Operation};
//!
//! assert_eq!(calculate_text(Operation::Divide, 10.0, 2.0), "5");
//! ```

/// Book search over the store plus LLM summarization.
pub mod book_search;
/// Arithmetic tools.
pub mod calculator;
