//! Session token claims

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::document::JsonMap;

/// JWT claims: the caller's own object plus issue and expiry timestamps
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub user: JsonMap,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// Claims valid from now for `ttl`
    pub fn new(mut user: JsonMap, ttl: Duration) -> Self {
        user.remove("iat");
        user.remove("exp");
        let now = Utc::now();
        Self {
            user,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token; expiry is checked without leeway
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }
}
