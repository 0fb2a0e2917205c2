use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Caller identity attached to the request by the auth gate.
///
/// Add this as a handler parameter to require authentication. A request the
/// gate could not authenticate is rejected with `401 TOKEN_MISSING`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub email: String,
    /// Always empty; there are no roles.
    pub authorities: Vec<String>,
}

impl AuthenticatedPrincipal {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            authorities: Vec::new(),
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .ok_or(AppError::TokenMissing)
    }
}
