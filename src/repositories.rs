use crate::models::{Book, CreateBookRequest, DatabaseError, DeleteBookRequest, UpdateBookRequest};
use async_trait::async_trait;

/// One statement per call; implementations never retry.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// Returns the id the database assigned to the new row.
    async fn create_book(&self, req: &CreateBookRequest) -> Result<i64, DatabaseError>;

    async fn find_all_books(&self) -> Result<Vec<Book>, DatabaseError>;

    /// Returns the number of rows affected, which is zero when no book has the id.
    async fn update_book(&self, req: &UpdateBookRequest) -> Result<u64, DatabaseError>;

    /// Returns the number of rows affected, which is zero when no book has the id.
    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<u64, DatabaseError>;
}
