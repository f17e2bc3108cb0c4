//! Parameterized SQL construction for the book search tool.

use crate::search::intent::{SearchIntent, TextFilter};
use crate::types::{AppError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Projection shared by every book search.
pub const BASE_SELECT: &str = "SELECT title, author, avg_rating, bookshelves FROM btable";

pub const DEFAULT_LIMIT: u32 = 5;
pub const MAX_LIMIT: u32 = 20;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// Column a search result is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    AvgRating,
    Title,
    Author,
}

impl SortKey {
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::AvgRating => "avg_rating",
            SortKey::Title => "title",
            SortKey::Author => "author",
        }
    }

    /// Ratings sort best-first, text columns alphabetically.
    pub fn direction(&self) -> &'static str {
        match self {
            SortKey::AvgRating => "DESC",
            SortKey::Title | SortKey::Author => "ASC",
        }
    }
}

/// Arguments of the `searchBooks` tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text search, e.g. "top rated fantasy" or "books by Tolkien"
    pub query: String,
    /// Sort column (default: avg_rating, highest first)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortKey>,
    /// Minimum average rating, 0 to 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 5))]
    pub min_rating: Option<f64>,
    /// Maximum average rating, 0 to 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 5))]
    pub max_rating: Option<f64>,
    /// Maximum number of books to return, 1 to 20 (default: 5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 20))]
    pub limit: Option<u32>,
    /// Restrict to books whose bookshelves contain this text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookshelf: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_by = Some(key);
        self
    }

    pub fn min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn max_rating(mut self, rating: f64) -> Self {
        self.max_rating = Some(rating);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn bookshelf(mut self, shelf: impl Into<String>) -> Self {
        self.bookshelf = Some(shelf.into());
        self
    }

    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    pub fn effective_sort(&self) -> SortKey {
        self.sort_by.unwrap_or_default()
    }

    /// Enforce the bounds advertised in the tool schema.
    pub fn validate(&self) -> Result<()> {
        for (name, rating) in [("minRating", self.min_rating), ("maxRating", self.max_rating)] {
            if let Some(value) = rating {
                if !(MIN_RATING..=MAX_RATING).contains(&value) {
                    return Err(AppError::InvalidInput(format!(
                        "{} must be between {} and {}, got {}",
                        name, MIN_RATING, MAX_RATING, value
                    )));
                }
            }
        }

        if let Some(limit) = self.limit {
            if !(1..=MAX_LIMIT).contains(&limit) {
                return Err(AppError::InvalidInput(format!(
                    "limit must be between 1 and {}, got {}",
                    MAX_LIMIT, limit
                )));
            }
        }

        Ok(())
    }
}

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Real(f64),
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<f64> for SqlParam {
    fn from(value: f64) -> Self {
        SqlParam::Real(value)
    }
}

/// A ready-to-execute search statement plus what it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct BookQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
    pub intent: SearchIntent,
    pub text_filter: TextFilter,
    pub limit: u32,
}

fn like_pattern(text: &str) -> SqlParam {
    SqlParam::Text(format!("%{}%", text))
}

/// Build the SQL statement for a search.
///
/// User text only ever reaches the statement as a bound parameter. The
/// ORDER BY column comes from [`SortKey`] and the LIMIT from a `u32`, so
/// neither can carry SQL.
pub fn build(request: &SearchRequest) -> BookQuery {
    let intent = SearchIntent::classify(&request.query);
    let text_filter = TextFilter::classify(&request.query);

    let mut conditions: Vec<&'static str> = Vec::new();
    let mut params: Vec<SqlParam> = Vec::new();

    match text_filter {
        TextFilter::AllBooks => {}
        TextFilter::Author => {
            conditions.push("author LIKE ?");
            params.push(like_pattern(&request.query));
        }
        TextFilter::AnyField => {
            conditions.push("(title LIKE ? OR author LIKE ? OR bookshelves LIKE ?)");
            params.extend(std::iter::repeat_n(like_pattern(&request.query), 3));
        }
    }

    if let Some(min) = request.min_rating {
        conditions.push("avg_rating >= ?");
        params.push(SqlParam::Real(min));
    }
    if let Some(max) = request.max_rating {
        conditions.push("avg_rating <= ?");
        params.push(SqlParam::Real(max));
    }

    if let Some(shelf) = request.bookshelf.as_deref().filter(|s| !s.is_empty()) {
        conditions.push("bookshelves LIKE ?");
        params.push(like_pattern(shelf));
    }

    let mut sql = String::from(BASE_SELECT);
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    let sort = request.effective_sort();
    let limit = request.effective_limit();
    sql.push_str(&format!(
        " ORDER BY {} {} LIMIT {}",
        sort.column(),
        sort.direction(),
        limit
    ));

    BookQuery {
        sql,
        params,
        intent,
        text_filter,
        limit,
    }
}
