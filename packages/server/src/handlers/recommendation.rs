use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthenticatedPrincipal;
use crate::extractors::json::AppJson;
use crate::models::recommendation::validate_recommendation_request;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/recommendations",
    tag = "Recommendations",
    operation_id = "recommendRecipes",
    summary = "Recipe recommendations for a list of ingredients",
    description = "Forwards the ingredient names to the recommendation service and returns its JSON response unchanged.",
    request_body(content = Vec<String>, example = json!(["egg", "flour", "milk"])),
    responses(
        (status = 200, description = "Response of the recommendation service, verbatim"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 503, description = "Recommendation service unavailable (UPSTREAM_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload), fields(count = payload.len()))]
pub async fn recommend(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    AppJson(payload): AppJson<Vec<String>>,
) -> Result<impl IntoResponse, AppError> {
    validate_recommendation_request(&payload)?;

    let body = state
        .recommendations
        .recommend(&payload)
        .await
        .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

    Ok(([(CONTENT_TYPE, "application/json")], body))
}
