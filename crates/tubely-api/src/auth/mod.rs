//! Caller authentication
//!
//! The upload services only see the [`Authenticator`] trait: a bearer credential goes in,
//! a verified user id comes out.

pub mod jwt;

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use tubely_core::AppError;
use uuid::Uuid;

pub use jwt::{JwtAuthenticator, JwtClaims, TOKEN_ISSUER};

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve a bearer token to the id of the user it was issued to.
    async fn validate(&self, bearer_token: &str) -> Result<Uuid, AppError>;
}

/// Token from an `Authorization: Bearer <token>` header, if one is present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Validate an optional bearer token; a missing one is `Unauthenticated`.
pub async fn authenticate(
    authenticator: &dyn Authenticator,
    bearer_token: Option<&str>,
) -> Result<Uuid, AppError> {
    let token = bearer_token.ok_or_else(|| {
        AppError::Unauthenticated("Couldn't find bearer token".to_string())
    })?;
    authenticator.validate(token).await
}
