use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(raw: &str) -> Result<Self, BookTitleEmptyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(BookTitleEmptyError)
        } else {
            Ok(Self(trimmed.into()))
        }
    }

    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for BookTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
#[error("Book title cannot be empty")]
pub struct BookTitleEmptyError;

/// Catalog number of a book. Only presence is checked; the database decides the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(raw: &str) -> Result<Self, IsbnEmptyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(IsbnEmptyError)
        } else {
            Ok(Self(trimmed.into()))
        }
    }

    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for Isbn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
#[error("Book ISBN cannot be empty")]
pub struct IsbnEmptyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: i64,
    details: BookDetails,
}

impl Book {
    pub const fn new(id: i64, details: BookDetails) -> Self {
        Self { id, details }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub const fn details(&self) -> &BookDetails {
        &self.details
    }
}

/// The client-writable fields of a book. Create and update both carry all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    title: BookTitle,
    author_id: i64,
    category_id: i64,
    isbn: Isbn,
}

impl BookDetails {
    pub const fn new(title: BookTitle, author_id: i64, category_id: i64, isbn: Isbn) -> Self {
        Self {
            title,
            author_id,
            category_id,
            isbn,
        }
    }

    pub const fn title(&self) -> &BookTitle {
        &self.title
    }

    pub const fn author_id(&self) -> i64 {
        self.author_id
    }

    pub const fn category_id(&self) -> i64 {
        self.category_id
    }

    pub const fn isbn(&self) -> &Isbn {
        &self.isbn
    }
}

#[derive(Debug)]
pub struct CreateBookRequest {
    details: BookDetails,
}

impl CreateBookRequest {
    pub const fn new(details: BookDetails) -> Self {
        Self { details }
    }

    pub const fn details(&self) -> &BookDetails {
        &self.details
    }
}

#[derive(Debug)]
pub struct UpdateBookRequest {
    id: i64,
    details: BookDetails,
}

impl UpdateBookRequest {
    pub const fn new(id: i64, details: BookDetails) -> Self {
        Self { id, details }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub const fn details(&self) -> &BookDetails {
        &self.details
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i64,
}

impl DeleteBookRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

/// Any failure reported by the database client while running a book statement.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct DatabaseError(#[from] pub anyhow::Error);

impl DatabaseError {
    /// The underlying driver message, without the context added on the way up.
    pub fn message(&self) -> String {
        self.0.root_cause().to_string()
    }
}
