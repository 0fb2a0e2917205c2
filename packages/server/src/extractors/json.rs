use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Request body extractor whose rejections are `400 VALIDATION_ERROR` bodies.
///
/// Field-level problems (missing `title`, an unknown `unit`) keep serde's
/// message so clients can see which field was wrong.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        Ok(AppJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Expected a request body with Content-Type: application/json".to_string()
        }
        JsonRejection::JsonSyntaxError(e) => format!("Malformed JSON: {}", e.body_text()),
        JsonRejection::JsonDataError(e) => format!("Invalid request body: {}", e.body_text()),
        other => other.body_text(),
    };
    AppError::Validation(message)
}
