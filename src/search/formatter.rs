//! Prompt construction from search results.

use crate::search::intent::SearchIntent;
use crate::types::{Book, ChatMessage};

/// Persona sent as the system turn of every book search.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that provides detailed information \
about books. Focus on providing comprehensive summaries that include title, author, average \
rating, and relevant context.";

/// Render rows as four `Label: value` lines each, rows separated by a blank line.
pub fn format_context(books: &[Book]) -> String {
    books
        .iter()
        .map(|book| {
            format!(
                "Title: {}\nAuthor: {}\nRating: {}\nBookshelf: {}",
                book.title, book.author, book.avg_rating, book.bookshelves
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_prompt(intent: SearchIntent, query: &str, limit: u32, context: &str) -> String {
    match intent {
        SearchIntent::TopRated => format!(
            "Here are the top {limit} highest rated books:\n{context}\n\n\
             Please list these books in order of their average ratings, showing the title, \
             author, and rating for each."
        ),
        SearchIntent::Recommendation => format!(
            "Based on the search query \"{query}\", here are some recommended books:\n{context}\n\n\
             Please provide a brief summary of each book, focusing on why it might be similar \
             to or recommended based on the query. Include the title, author, and average \
             rating for each."
        ),
        SearchIntent::AuthorLookup => format!(
            "Here are books by the author matching \"{query}\":\n{context}\n\n\
             Please list these books, showing the title, average rating, and bookshelf for each."
        ),
        SearchIntent::Generic => format!(
            "Here are some relevant books I found for \"{query}\":\n{context}\n\n\
             Please provide a brief summary of each book, focusing on the title, author, and \
             average rating. If there are multiple books, highlight the ones with the highest \
             ratings."
        ),
    }
}

/// The `[system, user]` conversation sent to the inference backend.
pub fn build_messages(
    intent: SearchIntent,
    query: &str,
    limit: u32,
    books: &[Book],
) -> Vec<ChatMessage> {
    let context = format_context(books);
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_prompt(intent, query, limit, &context)),
    ]
}
