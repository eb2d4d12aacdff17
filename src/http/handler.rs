use crate::http::AppState;
use crate::models::{
    Book, BookDetails, BookTitle, BookTitleEmptyError, CreateBookRequest, DatabaseError,
    DeleteBookRequest, Isbn, IsbnEmptyError, UpdateBookRequest,
};
use crate::repositories::BookRepository;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const UPDATED_MESSAGE: &str = "Updated successfully";
const DELETED_MESSAGE: &str = "Deleted successfully";

#[derive(Debug)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub const fn new(status: StatusCode, data: T) -> Self {
        Self(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> axum::response::Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    error: String,
}

#[derive(Debug)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Rejected(StatusCode, String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected(status, _) => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let (Self::InternalServerError(error)
        | Self::UnprocessableEntity(error)
        | Self::Rejected(_, error)) = self;
        (status, Json(ApiErrorResponse { error })).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        tracing::error!("{:#}", err.0);
        Self::InternalServerError(err.message())
    }
}

impl From<ParseBookHttpRequestError> for ApiError {
    fn from(err: ParseBookHttpRequestError) -> Self {
        Self::UnprocessableEntity(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected(rejection.status(), rejection.body_text())
    }
}

/// Body accepted by both create and update; every field is required.
#[derive(Debug, Deserialize)]
pub struct BookHttpRequest {
    title: String,
    author_id: i64,
    category_id: i64,
    isbn: String,
}

#[derive(Error, Debug)]
pub enum ParseBookHttpRequestError {
    #[error(transparent)]
    Title(#[from] BookTitleEmptyError),
    #[error(transparent)]
    Isbn(#[from] IsbnEmptyError),
}

impl TryFrom<BookHttpRequest> for BookDetails {
    type Error = ParseBookHttpRequestError;

    fn try_from(value: BookHttpRequest) -> Result<Self, Self::Error> {
        let title = BookTitle::new(&value.title)?;
        let isbn = Isbn::new(&value.isbn)?;
        Ok(Self::new(title, value.author_id, value.category_id, isbn))
    }
}

#[derive(Debug, Serialize)]
pub struct CreateBookHttpResponse {
    id: i64,
}

#[derive(Debug, Serialize)]
pub struct BookHttpResponse {
    id: i64,
    title: String,
    author_id: i64,
    category_id: i64,
    isbn: String,
}

impl From<Book> for BookHttpResponse {
    fn from(value: Book) -> Self {
        let details = value.details();
        Self {
            id: value.id(),
            title: details.title().to_string(),
            author_id: details.author_id(),
            category_id: details.category_id(),
            isbn: details.isbn().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageHttpResponse {
    message: &'static str,
}

pub async fn create_book<BR: BookRepository>(
    State(state): State<AppState<BR>>,
    body: Result<Json<BookHttpRequest>, JsonRejection>,
) -> Result<ApiSuccess<CreateBookHttpResponse>, ApiError> {
    let Json(body) = body?;
    let req = CreateBookRequest::new(body.try_into()?);
    state
        .book_repo
        .create_book(&req)
        .await
        .map_err(ApiError::from)
        .map(|id| ApiSuccess::new(StatusCode::CREATED, CreateBookHttpResponse { id }))
}

pub async fn list_books<BR: BookRepository>(
    State(state): State<AppState<BR>>,
) -> Result<ApiSuccess<Vec<BookHttpResponse>>, ApiError> {
    state
        .book_repo
        .find_all_books()
        .await
        .map_err(ApiError::from)
        .map(|books| {
            let books = books.into_iter().map(BookHttpResponse::from).collect();
            ApiSuccess::new(StatusCode::OK, books)
        })
}

pub async fn update_book<BR: BookRepository>(
    State(state): State<AppState<BR>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<BookHttpRequest>, JsonRejection>,
) -> Result<ApiSuccess<MessageHttpResponse>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let req = UpdateBookRequest::new(id, body.try_into()?);
    let rows = state.book_repo.update_book(&req).await?;
    if rows == 0 {
        tracing::debug!(id, "update matched no book");
    }
    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageHttpResponse {
            message: UPDATED_MESSAGE,
        },
    ))
}

pub async fn delete_book<BR: BookRepository>(
    State(state): State<AppState<BR>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<MessageHttpResponse>, ApiError> {
    let Path(id) = id?;
    let req = DeleteBookRequest::new(id);
    let rows = state.book_repo.delete_book(&req).await?;
    if rows == 0 {
        tracing::debug!(id, "delete matched no book");
    }
    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageHttpResponse {
            message: DELETED_MESSAGE,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use axum::body::to_bytes;

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn database_error_surfaces_raw_message() {
        let err = DatabaseError(anyhow!("Connection refused").context("Failed to create book"));
        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, r#"{"error":"Connection refused"}"#);
    }

    #[tokio::test]
    async fn validation_error_is_unprocessable() {
        let err = ParseBookHttpRequestError::from(BookTitleEmptyError);
        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_text(response).await,
            r#"{"error":"Book title cannot be empty"}"#
        );
    }

    #[test]
    fn request_fields_are_validated() {
        let body = BookHttpRequest {
            title: " Dune ".to_string(),
            author_id: 1,
            category_id: 2,
            isbn: "123".to_string(),
        };
        let details = BookDetails::try_from(body).unwrap();
        assert_eq!(details.title().to_string(), "Dune");
        assert_eq!(details.author_id(), 1);
        assert_eq!(details.category_id(), 2);

        let body = BookHttpRequest {
            title: "Dune".to_string(),
            author_id: 1,
            category_id: 2,
            isbn: " ".to_string(),
        };
        assert!(matches!(
            BookDetails::try_from(body),
            Err(ParseBookHttpRequestError::Isbn(_))
        ));
    }
}
