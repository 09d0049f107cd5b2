//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrows, health};
use crate::services::auth::TOKEN_COOKIE;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Pulse API",
        version = "1.0.0",
        description = "Book catalog and borrowing REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::root,
        health::health_check,
        health::readiness_check,
        // Session
        auth::issue_token,
        auth::logout,
        auth::current_session,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        // Borrows
        borrows::list_borrows,
        borrows::create_borrow,
        borrows::delete_borrow,
    ),
    components(
        schemas(
            auth::SessionResponse,
            crate::models::book::BookPayload,
            crate::models::book::UpdateBookResponse,
            crate::models::CreateBorrow,
            crate::models::InsertAck,
            crate::models::DeleteAck,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SessionCookie),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Session cookie endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "borrows", description = "Borrow records")
    )
)]
pub struct ApiDoc;

/// Declares the `token` cookie as the session security scheme
struct SessionCookie;

impl Modify for SessionCookie {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(TOKEN_COOKIE))),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
