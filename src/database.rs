use crate::models::{
    Book, BookDetails, BookTitle, CreateBookRequest, DatabaseError, DeleteBookRequest, Isbn,
    UpdateBookRequest,
};
use crate::repositories::BookRepository;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, FromRow, Row};

const INSERT_BOOK: &str =
    "INSERT INTO books (title, author_id, category_id, isbn) VALUES (?, ?, ?, ?)";
const INSERT_BOOK_RETURNING_ID: &str =
    "INSERT INTO books (title, author_id, category_id, isbn) VALUES (?, ?, ?, ?) RETURNING book_id";
const SELECT_ALL_BOOKS: &str = "SELECT book_id, title, author_id, category_id, isbn FROM books";
const UPDATE_BOOK: &str =
    "UPDATE books SET title = ?, author_id = ?, category_id = ?, isbn = ? WHERE book_id = ?";
const DELETE_BOOK: &str = "DELETE FROM books WHERE book_id = ?";

const SQLITE_BACKEND: &str = "SQLite";

/// Opens a pool for any URL the installed sqlx drivers understand (`mysql://`, `sqlite:`).
pub async fn establish_pool(url: &str, max_connections: u32) -> anyhow::Result<AnyPool> {
    sqlx::any::install_default_drivers();

    let pool = AnyPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

#[derive(Debug, Clone)]
pub struct DefaultBookRepository {
    pool: AnyPool,
}

impl DefaultBookRepository {
    #[must_use]
    pub const fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, AnyRow> for Book {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("book_id")?;
        let title: String = row.try_get("title")?;
        let author_id = row.try_get("author_id")?;
        let category_id = row.try_get("category_id")?;
        let isbn: String = row.try_get("isbn")?;

        let title = BookTitle::new_unchecked(&title);
        let isbn = Isbn::new_unchecked(&isbn);
        Ok(Self::new(
            id,
            BookDetails::new(title, author_id, category_id, isbn),
        ))
    }
}

#[async_trait]
impl BookRepository for DefaultBookRepository {
    async fn create_book(&self, req: &CreateBookRequest) -> Result<i64, DatabaseError> {
        let details = req.details();
        let create_err = |err: sqlx::Error| {
            anyhow!(err).context(format!(
                r#"Failed to create book with title "{}""#,
                details.title()
            ))
        };

        let mut conn = self.pool.acquire().await.map_err(create_err)?;

        // The Any driver only reports last_insert_id for MySQL; SQLite hands the id back inline.
        if conn.backend_name() == SQLITE_BACKEND {
            let id = sqlx::query_scalar(INSERT_BOOK_RETURNING_ID)
                .bind(details.title().to_string())
                .bind(details.author_id())
                .bind(details.category_id())
                .bind(details.isbn().to_string())
                .fetch_one(&mut *conn)
                .await
                .map_err(create_err)?;
            return Ok(id);
        }

        let result = sqlx::query(INSERT_BOOK)
            .bind(details.title().to_string())
            .bind(details.author_id())
            .bind(details.category_id())
            .bind(details.isbn().to_string())
            .execute(&mut *conn)
            .await
            .map_err(create_err)?;

        let id = result
            .last_insert_id()
            .context("Database did not report the id of the created book")?;

        Ok(id)
    }

    async fn find_all_books(&self) -> Result<Vec<Book>, DatabaseError> {
        let books = sqlx::query_as(SELECT_ALL_BOOKS)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| anyhow!(err).context("Failed to retrieve all books"))?;

        Ok(books)
    }

    async fn update_book(&self, req: &UpdateBookRequest) -> Result<u64, DatabaseError> {
        let details = req.details();
        let result = sqlx::query(UPDATE_BOOK)
            .bind(details.title().to_string())
            .bind(details.author_id())
            .bind(details.category_id())
            .bind(details.isbn().to_string())
            .bind(req.id())
            .execute(&self.pool)
            .await
            .map_err(|err| {
                anyhow!(err).context(format!(r#"Failed to update book with id "{}""#, req.id()))
            })?;

        Ok(result.rows_affected())
    }

    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<u64, DatabaseError> {
        let result = sqlx::query(DELETE_BOOK)
            .bind(req.id())
            .execute(&self.pool)
            .await
            .map_err(|err| {
                anyhow!(err).context(format!(r#"Failed to delete book with id "{}""#, req.id()))
            })?;

        Ok(result.rows_affected())
    }
}
