use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use super::AuthError;
use crate::error::AppError;
use crate::extractors::auth::AuthenticatedPrincipal;
use crate::services::UserDirectory;
use crate::state::AppState;

/// Attach an [`AuthenticatedPrincipal`] when the request carries a valid bearer token.
///
/// Never rejects: on any failure the request continues unauthenticated and the
/// principal extractor decides.
pub async fn auth_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if req.extensions().get::<AuthenticatedPrincipal>().is_none() {
        match authenticate(&state, req.headers()).await {
            Ok(principal) => {
                req.extensions_mut().insert(principal);
            }
            Err(GateFailure::Auth(AuthError::MissingHeader)) => {}
            Err(GateFailure::Auth(e)) => {
                tracing::debug!(error = %e, "Bearer token rejected");
            }
            Err(GateFailure::Provision(e)) => {
                tracing::warn!(error = ?e, "Could not resolve user for verified token");
            }
        }
    }

    next.run(req).await
}

enum GateFailure {
    Auth(AuthError),
    Provision(AppError),
}

async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedPrincipal, GateFailure> {
    let token = bearer_token(headers).map_err(GateFailure::Auth)?;
    let identity = state
        .identity
        .verify(token)
        .await
        .map_err(GateFailure::Auth)?;

    let user = UserDirectory::new(&state.db)
        .provision(&identity.email, identity.display_name.as_deref())
        .await
        .map_err(GateFailure::Provision)?;

    Ok(AuthenticatedPrincipal::new(user.email))
}

/// Token of an `Authorization` header of exactly two space-separated parts, the first `Bearer`.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}
