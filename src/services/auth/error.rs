//! Authentication / authorization failure carried to the client.
//!
//! `code` is machine readable (`invalid_header`, `token_expired`, ...),
//! `description` is what ends up in the envelope's `message`.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    pub status: StatusCode,
    pub code: &'static str,
    pub description: &'static str,
}

impl AuthError {
    pub const fn new(status: StatusCode, code: &'static str, description: &'static str) -> Self {
        Self {
            status,
            code,
            description,
        }
    }

    pub const fn header_missing() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "authorization_header_missing",
            "Authorization header is expected.",
        )
    }

    pub const fn invalid_header(description: &'static str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "invalid_header", description)
    }

    pub const fn unparseable_token() -> Self {
        Self::invalid_header("Unable to parse authentication token.")
    }

    pub const fn key_not_found() -> Self {
        Self::invalid_header("Unable to find the appropriate key.")
    }

    pub const fn keys_unavailable() -> Self {
        Self::invalid_header("Unable to fetch signing keys.")
    }

    pub const fn token_expired() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "token_expired", "Token expired.")
    }

    pub const fn incorrect_claims() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_claims",
            "Incorrect claims. Please, check the audience and issuer.",
        )
    }

    /// The token was issued without RBAC permission claims.
    pub const fn permissions_missing() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_claims",
            "Permissions not included in JWT.",
        )
    }

    pub const fn permission_not_found() -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            "unauthorized",
            "Permission not found.",
        )
    }
}
