//! End-to-end `searchBooks` tests: real libSQL store, mock inference.

mod common;

use bookwise::search::formatter::SYSTEM_PROMPT;
use bookwise::search::SearchRequest;
use bookwise::tools::book_search::search_books;
use bookwise::types::{AppError, MessageRole};
use bookwise::types::Rating;
use bookwise::{BookStore, BookwiseMcpServer, TursoClient};
use common::mocks::{book, seeded_store, FailingBookStore, MockLLMClient};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::ErrorCode;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_returns_llm_text() {
    let store = seeded_store().await;
    let llm = MockLLMClient::new("Here are your books.");

    let answer = search_books(store.as_ref(), &llm, &SearchRequest::new("fantasy"))
        .await
        .unwrap();

    assert_eq!(answer, "Here are your books.");
}

#[tokio::test]
async fn test_top_rated_prompt() {
    let store = seeded_store().await;
    let llm = MockLLMClient::new("ok");

    search_books(store.as_ref(), &llm, &SearchRequest::new("top rated").limit(2))
        .await
        .unwrap();

    let messages = llm.last_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::System);
    assert_eq!(messages[0].content, SYSTEM_PROMPT);
    assert_eq!(messages[1].role, MessageRole::User);
    assert_eq!(
        messages[1].content,
        "Here are the top 2 highest rated books:\n\
         Title: Mistborn\nAuthor: Brandon Sanderson\nRating: 4.45\nBookshelf: fantasy\n\n\
         Title: The Fellowship of the Ring\nAuthor: J.R.R. Tolkien\nRating: 4.36\nBookshelf: fantasy, epic\n\n\
         Please list these books in order of their average ratings, showing the title, author, and rating for each."
    );
}

#[tokio::test]
async fn test_no_rows_still_prompts() {
    let store = seeded_store().await;
    let llm = MockLLMClient::new("Nothing matched.");

    let answer = search_books(store.as_ref(), &llm, &SearchRequest::new("zzzz"))
        .await
        .unwrap();

    assert_eq!(answer, "Nothing matched.");
    assert_eq!(
        llm.last_messages()[1].content,
        "Here are some relevant books I found for \"zzzz\":\n\n\n\
         Please provide a brief summary of each book, focusing on the title, author, and average rating. \
         If there are multiple books, highlight the ones with the highest ratings."
    );
}

#[tokio::test]
async fn test_structured_output_is_serialized() {
    let store = seeded_store().await;
    let llm = MockLLMClient::structured(json!({ "response": "Dune", "usage": { "tokens": 3 } }));

    let answer = search_books(store.as_ref(), &llm, &SearchRequest::new("Dune"))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&answer).unwrap();
    assert_eq!(parsed["response"], "Dune");
}

#[tokio::test]
async fn test_invalid_request_never_reaches_llm() {
    let store = seeded_store().await;
    let llm = MockLLMClient::new("unused");

    let result = search_books(
        store.as_ref(),
        &llm,
        &SearchRequest::new("fantasy").min_rating(7.0),
    )
    .await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
    assert!(llm.last_messages().is_empty());
}

#[tokio::test]
async fn test_llm_failure_propagates() {
    let store = seeded_store().await;
    let llm = MockLLMClient::failing();

    let result = search_books(store.as_ref(), &llm, &SearchRequest::new("fantasy")).await;

    assert!(matches!(result, Err(AppError::LLM(_))));
}

#[tokio::test]
async fn test_store_failure_propagates_without_inference() {
    let llm = MockLLMClient::new("unused");

    let result = search_books(&FailingBookStore, &llm, &SearchRequest::new("fantasy")).await;

    match result {
        Err(AppError::Database(msg)) => assert!(msg.contains("btable"), "{}", msg),
        other => panic!("Expected database error, got {:?}", other),
    }
    assert!(llm.last_messages().is_empty());
}

#[tokio::test]
async fn test_store_failure_is_internal_tool_error() {
    let llm = MockLLMClient::new("unused");
    let server = BookwiseMcpServer::new(Arc::new(FailingBookStore), Arc::new(llm.clone()));

    let err = server
        .search_books(Parameters(SearchRequest::new("fantasy")))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert!(llm.last_messages().is_empty());
}

#[tokio::test]
async fn test_odd_rating_row_reaches_prompt_verbatim() {
    let store = TursoClient::new_memory().await.unwrap();
    store
        .insert_book(&book("Ghost Shelf", "Nobody", Rating::Text("N/A".to_string()), "fantasy"))
        .await
        .unwrap();
    store
        .insert_book(&book("The Hobbit", "J.R.R. Tolkien", 4.27, "fantasy"))
        .await
        .unwrap();
    let llm = MockLLMClient::new("ok");

    let answer = search_books(&store, &llm, &SearchRequest::new("fantasy"))
        .await
        .unwrap();

    assert_eq!(answer, "ok");
    let prompt = &llm.last_messages()[1].content;
    assert!(prompt.contains("Title: Ghost Shelf\nAuthor: Nobody\nRating: N/A\n"));
    assert!(prompt.contains("Title: The Hobbit\nAuthor: J.R.R. Tolkien\nRating: 4.27\n"));
}
