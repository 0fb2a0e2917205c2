use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthenticatedPrincipal;
use crate::extractors::json::AppJson;
use crate::models::ingredient::{CreateIngredientRequest, IngredientResponse};
use crate::services::IngredientCatalog;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Ingredients",
    operation_id = "listIngredients",
    summary = "List all ingredients",
    responses(
        (status = 200, description = "All known ingredients", body = Vec<IngredientResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, principal), fields(caller = %principal.email))]
pub async fn list_ingredients(
    principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
) -> Result<Json<Vec<IngredientResponse>>, AppError> {
    let all = IngredientCatalog::new(&state.db).list_all().await?;
    Ok(Json(all.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Ingredients",
    operation_id = "getIngredient",
    summary = "Get an ingredient by ID",
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "Ingredient not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn get_ingredient(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientResponse>, AppError> {
    let model = IngredientCatalog::new(&state.db).get_by_id(id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Ingredients",
    operation_id = "createIngredient",
    summary = "Create an ingredient",
    description = "Ingredient names are unique and case-sensitive.",
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 409, description = "Name already taken (CONFLICT)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload), fields(name = %payload.name))]
pub async fn create_ingredient(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateIngredientRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = IngredientCatalog::new(&state.db)
        .create(&payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(IngredientResponse::from(model))))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Ingredients",
    operation_id = "deleteIngredient",
    summary = "Delete an ingredient",
    description = "Deleting a missing ingredient succeeds. An ingredient still used by a recipe or pantry cannot be deleted.",
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 409, description = "Ingredient still referenced (CONFLICT)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn delete_ingredient(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    IngredientCatalog::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
