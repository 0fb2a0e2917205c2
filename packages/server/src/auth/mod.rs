//! Bearer-token authentication.
//!
//! The gate middleware verifies `Authorization: Bearer <token>` through an
//! [`IdentityProvider`], provisions the local user record on first sight and
//! attaches an [`AuthenticatedPrincipal`](crate::extractors::auth::AuthenticatedPrincipal).
//! It never rejects; handlers opt in to authentication through the extractor.

pub mod firebase;
pub mod gate;

use async_trait::async_trait;
use thiserror::Error;

pub use firebase::FirebaseVerifier;
pub use gate::auth_gate;

/// Identity proven by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("malformed Authorization header")]
    MalformedHeader,
    #[error("token header has no key id")]
    MissingKeyId,
    #[error("unsupported signing algorithm {0:?}")]
    UnsupportedAlgorithm(jsonwebtoken::Algorithm),
    #[error("no signing key with id '{0}'")]
    UnknownKey(String),
    #[error("failed to fetch signing keys: {0}")]
    KeyFetch(#[from] reqwest::Error),
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("token has an empty subject")]
    EmptySubject,
    #[error("token carries no email claim")]
    MissingEmail,
}

/// Verifies bearer tokens issued by an external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError>;
}
