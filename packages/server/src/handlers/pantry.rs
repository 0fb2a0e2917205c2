use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthenticatedPrincipal;
use crate::extractors::json::AppJson;
use crate::models::pantry::UserIngredientResponse;
use crate::models::shared::{IngredientEntryRequest, into_lines};
use crate::services::PantryStore;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/{user_email}",
    tag = "Pantry",
    operation_id = "listPantry",
    summary = "List a user's pantry",
    description = "An unknown email has an empty pantry.",
    params(("user_email" = String, Path, description = "Pantry owner email")),
    responses(
        (status = 200, description = "Pantry entries", body = Vec<UserIngredientResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn list_pantry(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(user_email): Path<String>,
) -> Result<Json<Vec<UserIngredientResponse>>, AppError> {
    let entries = PantryStore::new(&state.db)
        .list_for_user(&user_email)
        .await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/{user_email}",
    tag = "Pantry",
    operation_id = "addPantryEntry",
    summary = "Add an ingredient to a user's pantry",
    params(("user_email" = String, Path, description = "Pantry owner email")),
    request_body = IngredientEntryRequest,
    responses(
        (status = 201, description = "Entry added", body = UserIngredientResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Ingredient already in the pantry (CONFLICT)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload), fields(ingredient = %payload.ingredient.name))]
pub async fn add_pantry_entry(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(user_email): Path<String>,
    AppJson(payload): AppJson<IngredientEntryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let line = payload.into_line()?;
    let entry = PantryStore::new(&state.db).add(line, &user_email).await?;
    Ok((StatusCode::CREATED, Json(UserIngredientResponse::from(entry))))
}

#[utoipa::path(
    post,
    path = "/batch/{user_email}",
    tag = "Pantry",
    operation_id = "addPantryEntries",
    summary = "Add several ingredients to a user's pantry",
    description = "All or nothing: if any entry fails, none are added.",
    params(("user_email" = String, Path, description = "Pantry owner email")),
    request_body = Vec<IngredientEntryRequest>,
    responses(
        (status = 201, description = "Entries added", body = Vec<UserIngredientResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "An ingredient is already in the pantry (CONFLICT)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload), fields(count = payload.len()))]
pub async fn add_pantry_entries(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(user_email): Path<String>,
    AppJson(payload): AppJson<Vec<IngredientEntryRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let lines = into_lines(payload)?;
    let added = PantryStore::new(&state.db)
        .add_batch(lines, &user_email)
        .await?;
    let body: Vec<UserIngredientResponse> = added.into_iter().map(Into::into).collect();
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    delete,
    path = "/{user_email}/{ingredient_name}",
    tag = "Pantry",
    operation_id = "deletePantryEntry",
    summary = "Remove an ingredient from a user's pantry",
    params(
        ("user_email" = String, Path, description = "Pantry owner email"),
        ("ingredient_name" = String, Path, description = "Ingredient name"),
    ),
    responses(
        (status = 204, description = "Entry removed"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "User or entry not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn delete_pantry_entry(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path((user_email, ingredient_name)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    PantryStore::new(&state.db)
        .delete(&ingredient_name, &user_email)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/{user_email}",
    tag = "Pantry",
    operation_id = "updatePantry",
    summary = "Change quantities and units of pantry entries",
    description = "Entries are matched by ingredient name. All or nothing: a name missing from the pantry leaves every entry unchanged.",
    params(("user_email" = String, Path, description = "Pantry owner email")),
    request_body = Vec<IngredientEntryRequest>,
    responses(
        (status = 204, description = "Entries updated"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "User or entry not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload), fields(count = payload.len()))]
pub async fn update_pantry(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(user_email): Path<String>,
    AppJson(payload): AppJson<Vec<IngredientEntryRequest>>,
) -> Result<StatusCode, AppError> {
    let lines = into_lines(payload)?;
    PantryStore::new(&state.db)
        .update(lines, &user_email)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
