//! Session token issuance and verification

use chrono::Duration;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{JsonMap, SessionClaims},
};

/// Name of the cookie carrying the session token
pub const TOKEN_COOKIE: &str = "token";

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Sign the caller's payload into a session token
    pub fn issue_token(&self, user: JsonMap) -> AppResult<String> {
        let claims = SessionClaims::new(user, Duration::minutes(self.config.token_ttl_minutes));
        claims
            .create_token(&self.config.token_secret)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }

    /// Verify a session token taken from the cookie
    pub fn verify(&self, token: Option<&str>) -> AppResult<SessionClaims> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Authentication("not authorized".to_string()))?;

        SessionClaims::from_token(token, &self.config.token_secret).map_err(|e| {
            tracing::info!("Session token rejected: {}", e);
            AppError::Authentication("unauthorized".to_string())
        })
    }
}
