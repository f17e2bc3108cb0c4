use crate::db::traits::BookStore;
use crate::search::{BookQuery, SqlParam};
use crate::types::{format_number, AppError, Book, Rating, Result};
use async_trait::async_trait;
use libsql::{params::Params, Builder, Connection, Database, Row, Value};
use tracing::debug;

/// libSQL-backed book table: in-memory, local file, or remote Turso.
pub struct TursoClient {
    // Held so the database outlives the connection.
    _db: Database,
    conn: Connection,
}

impl TursoClient {
    /// Ephemeral database. All queries share one connection so the data
    /// stays visible between calls.
    pub async fn new_memory() -> Result<Self> {
        Self::new_local(":memory:").await
    }

    pub async fn new_local(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database {}: {}", path, e)))?;

        Self::from_database(db).await
    }

    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Turso: {}", e)))?;

        Self::from_database(db).await
    }

    async fn from_database(db: Database) -> Result<Self> {
        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        Ok(client)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    async fn initialize_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS btable (
                    title TEXT NOT NULL,
                    author TEXT NOT NULL,
                    avg_rating REAL,
                    bookshelves TEXT
                )",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to create btable: {}", e)))?;

        Ok(())
    }
}

fn bind(params: &[SqlParam]) -> Params {
    Params::Positional(
        params
            .iter()
            .map(|p| match p {
                SqlParam::Text(s) => Value::Text(s.clone()),
                SqlParam::Real(r) => Value::Real(*r),
            })
            .collect(),
    )
}

fn text_column(row: &Row, idx: i32) -> Result<String> {
    match row
        .get_value(idx)
        .map_err(|e| AppError::Database(e.to_string()))?
    {
        Value::Text(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Real(r) => Ok(format_number(r)),
        Value::Blob(b) => Ok(String::from_utf8_lossy(&b).into_owned()),
    }
}

// SQLite is loosely typed; a rating may come back as REAL, INTEGER, TEXT or NULL.
// Every storage class is kept so a single odd row cannot fail the search.
fn rating_column(row: &Row, idx: i32) -> Result<Rating> {
    let rating = match row
        .get_value(idx)
        .map_err(|e| AppError::Database(e.to_string()))?
    {
        Value::Real(r) => Rating::Number(r),
        Value::Integer(i) => Rating::Number(i as f64),
        Value::Null => Rating::Missing,
        Value::Text(s) => Rating::Text(s),
        Value::Blob(b) => Rating::Text(String::from_utf8_lossy(&b).into_owned()),
    };
    Ok(rating)
}

fn rating_value(rating: &Rating) -> Value {
    match rating {
        Rating::Number(r) => Value::Real(*r),
        Rating::Text(s) => Value::Text(s.clone()),
        Rating::Missing => Value::Null,
    }
}

#[async_trait]
impl BookStore for TursoClient {
    async fn search_books(&self, query: &BookQuery) -> Result<Vec<Book>> {
        debug!(sql = %query.sql, params = ?query.params, "Executing book search");

        let mut rows = self
            .conn
            .query(&query.sql, bind(&query.params))
            .await
            .map_err(|e| AppError::Database(format!("Failed to query books: {}", e)))?;

        let mut books = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            books.push(Book {
                title: text_column(&row, 0)?,
                author: text_column(&row, 1)?,
                avg_rating: rating_column(&row, 2)?,
                bookshelves: text_column(&row, 3)?,
            });
        }

        Ok(books)
    }

    async fn insert_book(&self, book: &Book) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO btable (title, author, avg_rating, bookshelves) VALUES (?, ?, ?, ?)",
                (
                    book.title.as_str(),
                    book.author.as_str(),
                    rating_value(&book.avg_rating),
                    book.bookshelves.as_str(),
                ),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert book: {}", e)))?;

        Ok(())
    }

    async fn count_books(&self) -> Result<u64> {
        let mut rows = self
            .conn
            .query("SELECT COUNT(*) FROM btable", ())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count books: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => {
                let count: i64 = row.get(0).map_err(|e| AppError::Database(e.to_string()))?;
                Ok(count.max(0) as u64)
            }
            None => Ok(0),
        }
    }
}
