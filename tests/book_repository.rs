use book_catalog::database::{DefaultBookRepository, establish_pool};
use book_catalog::models::{
    BookDetails, BookTitle, CreateBookRequest, DeleteBookRequest, Isbn, UpdateBookRequest,
};
use book_catalog::repositories::BookRepository;

const CREATE_BOOKS_TABLE: &str = "CREATE TABLE books (
    book_id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author_id INTEGER NOT NULL,
    category_id INTEGER NOT NULL,
    isbn TEXT NOT NULL
)";

async fn sqlite_repo() -> DefaultBookRepository {
    let pool = establish_pool("sqlite::memory:", 1).await.unwrap();
    sqlx::query(CREATE_BOOKS_TABLE).execute(&pool).await.unwrap();
    DefaultBookRepository::new(pool)
}

fn details(title: &str, isbn: &str) -> BookDetails {
    BookDetails::new(
        BookTitle::new(title).unwrap(),
        1,
        2,
        Isbn::new(isbn).unwrap(),
    )
}

#[tokio::test]
async fn create_returns_assigned_ids_in_sequence() {
    let repo = sqlite_repo().await;

    let first = repo
        .create_book(&CreateBookRequest::new(details("Dune", "123")))
        .await
        .unwrap();
    let second = repo
        .create_book(&CreateBookRequest::new(details("Hyperion", "456")))
        .await
        .unwrap();
    assert_eq!((first, second), (1, 2));

    let books = repo.find_all_books().await.unwrap();
    assert_eq!(books.len(), 2);
    assert!(books.iter().any(|b| b.id() == 2 && b.details() == &details("Hyperion", "456")));
}

#[tokio::test]
async fn update_reports_affected_rows() {
    let repo = sqlite_repo().await;
    let id = repo
        .create_book(&CreateBookRequest::new(details("Dune", "123")))
        .await
        .unwrap();

    let rows = repo
        .update_book(&UpdateBookRequest::new(id, details("Dune (rev)", "123")))
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let rows = repo
        .update_book(&UpdateBookRequest::new(id + 100, details("Ghost", "000")))
        .await
        .unwrap();
    assert_eq!(rows, 0);

    let books = repo.find_all_books().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].details(), &details("Dune (rev)", "123"));
}

#[tokio::test]
async fn delete_reports_affected_rows() {
    let repo = sqlite_repo().await;
    let id = repo
        .create_book(&CreateBookRequest::new(details("Dune", "123")))
        .await
        .unwrap();

    let rows = repo.delete_book(&DeleteBookRequest::new(id)).await.unwrap();
    assert_eq!(rows, 1);

    let rows = repo.delete_book(&DeleteBookRequest::new(id)).await.unwrap();
    assert_eq!(rows, 0);

    assert!(repo.find_all_books().await.unwrap().is_empty());
}
