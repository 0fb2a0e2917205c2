use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthenticatedPrincipal;
use crate::extractors::json::AppJson;
use crate::models::rating::{RatingRequest, RatingResponse};
use crate::services::RatingStore;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/{id}/rating",
    tag = "Ratings",
    operation_id = "getRecipeRating",
    summary = "Average score and number of ratings of a recipe",
    description = "Returns `[average, count]`. The average is truncated to an integer; a recipe without ratings gives `[0, 0]`.",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "[average, count]", body = Vec<i64>, example = json!([4, 3])),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn get_recipe_rating(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<[i64; 2]>, AppError> {
    let aggregate = RatingStore::new(&state.db).get_aggregate(id).await?;
    Ok(Json([aggregate.average, aggregate.count]))
}

#[utoipa::path(
    get,
    path = "/{recipe_id}/{user_email}",
    tag = "Ratings",
    operation_id = "getUserRating",
    summary = "The rating a user left on a recipe",
    description = "Returns `null` when the user has not rated the recipe.",
    params(
        ("recipe_id" = i32, Path, description = "Recipe ID"),
        ("user_email" = String, Path, description = "Email of the rater"),
    ),
    responses(
        (status = 200, description = "Rating, or null", body = Option<RatingResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn get_user_rating(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path((recipe_id, user_email)): Path<(i32, String)>,
) -> Result<Json<Option<RatingResponse>>, AppError> {
    let found = RatingStore::new(&state.db)
        .get_for_user_and_recipe(recipe_id, &user_email)
        .await?;
    Ok(Json(found.map(Into::into)))
}

#[utoipa::path(
    post,
    path = "/add/{id}/{email}",
    tag = "Ratings",
    operation_id = "addRating",
    summary = "Rate a recipe",
    description = "The same user may rate a recipe more than once; each rating is kept.",
    params(
        ("id" = i32, Path, description = "Recipe ID"),
        ("email" = String, Path, description = "Email of the rater"),
    ),
    request_body = RatingRequest,
    responses(
        (status = 201, description = "Rating created", body = RatingResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "Recipe or user not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload), fields(score = payload.rating))]
pub async fn add_rating(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path((id, email)): Path<(i32, String)>,
    AppJson(payload): AppJson<RatingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = RatingStore::new(&state.db)
        .create(payload.into(), id, &email)
        .await?;
    Ok((StatusCode::CREATED, Json(RatingResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/ratings/{rating_id}/update",
    tag = "Ratings",
    operation_id = "updateRating",
    summary = "Change the score and comment of a rating",
    params(("rating_id" = i32, Path, description = "Rating ID")),
    request_body = RatingRequest,
    responses(
        (status = 204, description = "Rating updated"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "Rating not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload), fields(score = payload.rating))]
pub async fn update_rating(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(rating_id): Path<i32>,
    AppJson(payload): AppJson<RatingRequest>,
) -> Result<StatusCode, AppError> {
    RatingStore::new(&state.db)
        .update(payload.into(), rating_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/{id}/ratings",
    tag = "Ratings",
    operation_id = "deleteRecipeRatings",
    summary = "Delete every rating of a recipe",
    description = "Run this before deleting the recipe itself.",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Ratings deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn delete_recipe_ratings(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let removed = RatingStore::new(&state.db).delete_for_recipe(id).await?;
    tracing::debug!(removed, "Deleted recipe ratings");
    Ok(StatusCode::NO_CONTENT)
}
