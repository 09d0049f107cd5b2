//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    models::{book::UpdateBookResponse, Book, InsertAck, JsonMap, SessionClaims},
    AppState,
};

/// List all books
#[utoipa::path(
    get,
    path = "/book",
    tag = "books",
    responses(
        (status = 200, description = "Every book, unfiltered")
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book document"),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_id(&id).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/book",
    tag = "books",
    security(("session_cookie" = [])),
    request_body = crate::models::book::BookPayload,
    responses(
        (status = 201, description = "Book created", body = InsertAck),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse),
        (status = 401, description = "No valid session", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    session: Option<Extension<SessionClaims>>,
    WithRejection(Json(book), _): WithRejection<Json<JsonMap>, AppError>,
) -> AppResult<(StatusCode, Json<InsertAck>)> {
    if let Some(Extension(claims)) = session {
        tracing::debug!("Book created by {:?}", claims.user.get("email"));
    }
    let ack = state.services.books.create(book).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

/// Update a book.
///
/// Sends a partial set of fields merged into the stored book; a body holding
/// only `quantity` is the quantity update used when books are borrowed or returned.
#[utoipa::path(
    put,
    path = "/book/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "Book ID")),
    request_body = crate::models::book::BookPayload,
    responses(
        (status = 200, description = "Book updated", body = UpdateBookResponse),
        (status = 400, description = "Malformed ID or body", body = crate::error::ErrorResponse),
        (status = 401, description = "No valid session", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found or not modified", body = UpdateBookResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(fields), _): WithRejection<Json<JsonMap>, AppError>,
) -> AppResult<(StatusCode, Json<UpdateBookResponse>)> {
    let response = state.services.books.update(&id, fields).await?;
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(response)))
}
