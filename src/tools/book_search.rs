use crate::db::BookStore;
use crate::llm::LLMClient;
use crate::search::{formatter, query_builder, SearchRequest};
use crate::types::Result;
use tracing::{debug, info};

/// Run a book search end to end: validate, query the store, then have the
/// LLM summarize the rows for the detected intent.
///
/// Each stage is awaited to completion before the next starts; store and
/// inference failures propagate unchanged.
pub async fn search_books(
    store: &dyn BookStore,
    llm: &dyn LLMClient,
    request: &SearchRequest,
) -> Result<String> {
    request.validate()?;

    let query = query_builder::build(request);
    info!(
        intent = %query.intent,
        limit = query.limit,
        "searchBooks"
    );

    let books = store.search_books(&query).await?;
    debug!(rows = books.len(), model = llm.model_name(), "Books fetched");

    let messages = formatter::build_messages(query.intent, &request.query, query.limit, &books);
    let output = llm.chat(&messages).await?;

    Ok(output.into_text())
}
