//! Keyword classification of free-text book queries.
//!
//! A query yields two independent derived values:
//!
//! - [`SearchIntent`] picks the prompt template handed to the LLM.
//! - [`TextFilter`] picks the shape of the SQL text-match condition.
//!
//! Both are computed from ordered rule tables over the lower-cased query, and
//! they deliberately disagree in places: a query such as
//! `"something like Dune by Herbert"` is a [`SearchIntent::Recommendation`]
//! but filters with [`TextFilter::Author`], because the filter table has no
//! recommendation rule.

/// A predicate over the lower-cased query paired with the value it selects.
type Rule<T> = (fn(&str) -> bool, T);

/// Which prompt template a search result is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchIntent {
    TopRated,
    Recommendation,
    AuthorLookup,
    Generic,
}

/// Which text-match condition the SQL statement carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFilter {
    /// No text condition; only rating and shelf bounds apply.
    AllBooks,
    /// `author LIKE ?`
    Author,
    /// `(title LIKE ? OR author LIKE ? OR bookshelves LIKE ?)`
    AnyField,
}

fn mentions_top_rated(query: &str) -> bool {
    query.contains("top") && (query.contains("rated") || query.contains("rating"))
}

fn mentions_recommendation(query: &str) -> bool {
    query.contains("recommend") || query.contains("similar to") || query.contains("like")
}

fn mentions_author(query: &str) -> bool {
    query.contains("by") || query.contains("author")
}

const INTENT_RULES: &[Rule<SearchIntent>] = &[
    (mentions_top_rated, SearchIntent::TopRated),
    (mentions_recommendation, SearchIntent::Recommendation),
    (mentions_author, SearchIntent::AuthorLookup),
];

const FILTER_RULES: &[Rule<TextFilter>] = &[
    (mentions_top_rated, TextFilter::AllBooks),
    (mentions_author, TextFilter::Author),
];

fn first_match<T: Copy>(rules: &[Rule<T>], query: &str, fallback: T) -> T {
    let query = query.to_lowercase();
    rules
        .iter()
        .find(|(matches, _)| matches(&query))
        .map(|(_, value)| *value)
        .unwrap_or(fallback)
}

impl SearchIntent {
    /// Classify a query. The first matching rule wins.
    pub fn classify(query: &str) -> Self {
        first_match(INTENT_RULES, query, SearchIntent::Generic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchIntent::TopRated => "top_rated",
            SearchIntent::Recommendation => "recommendation",
            SearchIntent::AuthorLookup => "author_lookup",
            SearchIntent::Generic => "generic",
        }
    }
}

impl TextFilter {
    pub fn classify(query: &str) -> Self {
        first_match(FILTER_RULES, query, TextFilter::AnyField)
    }
}

impl std::fmt::Display for SearchIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
