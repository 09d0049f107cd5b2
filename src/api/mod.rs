//! API handlers for Library Pulse REST endpoints

pub mod auth;
pub mod books;
pub mod borrows;
pub mod health;
pub mod openapi;

use std::any::Any;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use axum_extra::extract::CookieJar;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::CorsConfig,
    error::{AppError, AppResult},
    models::SessionClaims,
    services::auth::TOKEN_COOKIE,
    AppState,
};

/// Extractor for the session carried in the `token` cookie
pub struct SessionUser(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Already verified by the write guard
        if let Some(claims) = parts.extensions.get::<SessionClaims>() {
            return Ok(SessionUser(claims.clone()));
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let claims = state
            .services
            .auth
            .verify(jar.get(TOKEN_COOKIE).map(|cookie| cookie.value()))?;

        Ok(SessionUser(claims))
    }
}

/// Reject requests without a valid session and hand the claims to the handler
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let jar = CookieJar::from_headers(request.headers());
    let claims = state
        .services
        .auth
        .verify(jar.get(TOKEN_COOKIE).map(|cookie| cookie.value()))?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    if !state.config.auth.protect_writes {
        tracing::warn!("Book and borrow writes are open to unauthenticated clients");
    }

    let api = Router::new()
        // Health check
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Session
        .route("/jwt", post(auth::issue_token))
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::current_session))
        // Books
        .route(
            "/book",
            get(books::list_books).merge(guarded(&state, post(books::create_book))),
        )
        .route(
            "/book/:id",
            get(books::get_book).merge(guarded(&state, put(books::update_book))),
        )
        // Borrows
        .route(
            "/borrow",
            get(borrows::list_borrows).merge(guarded(&state, post(borrows::create_borrow))),
        )
        .route(
            "/borrow/:id",
            guarded(&state, delete(borrows::delete_borrow)),
        );

    let cors = cors_layer(&state.config.cors);

    api.with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Put a write route behind the session check.
///
/// Layered per method so unrouted methods still answer 405.
fn guarded(state: &AppState, method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
    if state.config.auth.protect_writes {
        method_router.route_layer(middleware::from_fn_with_state(state.clone(), require_session))
    } else {
        method_router
    }
}

/// Credentialed CORS for the trusted origins, or for any origin by mirroring it
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(config.allowed_origins.iter().filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| tracing::warn!("Ignoring invalid CORS origin {:?}", origin))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());
    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}
