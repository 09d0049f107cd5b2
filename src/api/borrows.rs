//! Borrow endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    models::{BorrowRecord, CreateBorrow, DeleteAck, InsertAck, SessionClaims},
    AppState,
};

/// List all borrow records
#[utoipa::path(
    get,
    path = "/borrow",
    tag = "borrows",
    responses(
        (status = 200, description = "Every borrow record, unfiltered")
    )
)]
pub async fn list_borrows(State(state): State<AppState>) -> AppResult<Json<Vec<BorrowRecord>>> {
    let borrows = state.services.borrows.list().await?;
    Ok(Json(borrows))
}

/// Record a borrow
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "borrows",
    security(("session_cookie" = [])),
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Borrow recorded", body = InsertAck),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse),
        (status = 401, description = "No valid session", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_borrow(
    State(state): State<AppState>,
    session: Option<Extension<SessionClaims>>,
    WithRejection(Json(request), _): WithRejection<Json<CreateBorrow>, AppError>,
) -> AppResult<(StatusCode, Json<InsertAck>)> {
    if let Some(Extension(claims)) = session {
        tracing::debug!("Borrow requested by {:?}", claims.user.get("email"));
    }
    let ack = state.services.borrows.create(request).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

/// Delete a borrow record (book returned or borrow cancelled)
#[utoipa::path(
    delete,
    path = "/borrow/{id}",
    tag = "borrows",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "Borrow record ID")),
    responses(
        (status = 200, description = "Delete acknowledgment; deletedCount is 0 for unknown IDs", body = DeleteAck),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorResponse),
        (status = 401, description = "No valid session", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_borrow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteAck>> {
    let ack = state.services.borrows.delete(&id).await?;
    Ok(Json(ack))
}
