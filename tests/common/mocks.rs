//! Mock implementations for testing.
//!
//! Shared across the integration test files so each one does not redefine
//! its own LLM stub.

#![allow(dead_code)]

use async_trait::async_trait;
use bookwise::db::{BookStore, TursoClient};
use bookwise::llm::{InferenceOutput, LLMClient};
use bookwise::search::BookQuery;
use bookwise::types::{AppError, Book, ChatMessage, Rating, Result};
use std::sync::{Arc, Mutex};

/// Mock LLM client with a canned answer.
///
/// Records the last conversation it was sent so tests can assert on the
/// prompt that the search pipeline produced.
///
/// ```ignore
/// let client = MockLLMClient::new("Dune is great");
/// let client = MockLLMClient::structured(json!({ "response": "hi" }));
/// let client = MockLLMClient::failing();
/// ```
#[derive(Clone)]
pub struct MockLLMClient {
    output: InferenceOutput,
    should_fail: bool,
    last_messages: Arc<Mutex<Vec<ChatMessage>>>,
}

impl MockLLMClient {
    /// Create a new mock client that answers with the given text.
    pub fn new(response: &str) -> Self {
        Self {
            output: InferenceOutput::Text(response.to_string()),
            should_fail: false,
            last_messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock client that answers with a non-string payload.
    pub fn structured(value: serde_json::Value) -> Self {
        Self {
            output: InferenceOutput::Structured(value),
            ..Self::new("")
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    /// The conversation passed to the most recent `chat` call.
    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<InferenceOutput> {
        *self.last_messages.lock().unwrap() = messages.to_vec();

        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }
        Ok(self.output.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Book store whose every call fails the way a missing table would.
pub struct FailingBookStore;

#[async_trait]
impl BookStore for FailingBookStore {
    async fn search_books(&self, _query: &BookQuery) -> Result<Vec<Book>> {
        Err(AppError::Database("no such table: btable".to_string()))
    }

    async fn insert_book(&self, _book: &Book) -> Result<()> {
        Err(AppError::Database("no such table: btable".to_string()))
    }

    async fn count_books(&self) -> Result<u64> {
        Err(AppError::Database("no such table: btable".to_string()))
    }
}

/// A small fixed catalogue.
pub fn sample_books() -> Vec<Book> {
    vec![
        book("The Hobbit", "J.R.R. Tolkien", 4.27, "fantasy, classics"),
        book("The Fellowship of the Ring", "J.R.R. Tolkien", 4.36, "fantasy, epic"),
        book("Dune", "Frank Herbert", 4.25, "science-fiction, classics"),
        book("Neuromancer", "William Gibson", 3.89, "science-fiction, cyberpunk"),
        book("Pride and Prejudice", "Jane Austen", 4.26, "romance, classics"),
        book("Mistborn", "Brandon Sanderson", 4.45, "fantasy"),
    ]
}

pub fn book(title: &str, author: &str, rating: impl Into<Rating>, shelves: &str) -> Book {
    Book {
        title: title.to_string(),
        author: author.to_string(),
        avg_rating: rating.into(),
        bookshelves: shelves.to_string(),
    }
}

/// In-memory store seeded with [`sample_books`].
pub async fn seeded_store() -> Arc<TursoClient> {
    let client = TursoClient::new_memory()
        .await
        .expect("Failed to create in-memory database");
    for book in sample_books() {
        client.insert_book(&book).await.expect("Failed to seed book");
    }
    Arc::new(client)
}
