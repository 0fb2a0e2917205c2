use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthenticatedPrincipal;
use crate::extractors::json::AppJson;
use crate::models::recipe::*;
use crate::models::shared::{IngredientEntryRequest, into_lines};
use crate::services::RecipeStore;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Recipes",
    operation_id = "listRecipes",
    summary = "List all recipes",
    responses(
        (status = 200, description = "All recipes with their ingredients", body = Vec<RecipeResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn list_recipes(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeResponse>>, AppError> {
    let recipes = RecipeStore::new(&state.db).list_all().await?;
    Ok(Json(recipes.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "getRecipe",
    summary = "Get a recipe by ID",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe with its ingredients", body = RecipeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn get_recipe(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, AppError> {
    let recipe = RecipeStore::new(&state.db).get_by_id(id).await?;
    Ok(Json(recipe.into()))
}

#[utoipa::path(
    get,
    path = "/user/{email}",
    tag = "Recipes",
    operation_id = "listRecipesByOwner",
    summary = "List recipes owned by an email",
    params(("email" = String, Path, description = "Owner email, matched exactly")),
    responses(
        (status = 200, description = "Recipes of that owner", body = Vec<RecipeResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn list_recipes_by_owner(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<RecipeResponse>>, AppError> {
    let recipes = RecipeStore::new(&state.db).list_by_owner(&email).await?;
    Ok(Json(recipes.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Recipes",
    operation_id = "createRecipe",
    summary = "Create a recipe",
    description = "Creates the recipe and any inline ingredients in one transaction. Both dates are set to today.",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload), fields(title = %payload.title))]
pub async fn create_recipe(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new = payload.into_new_recipe()?;
    let recipe = RecipeStore::new(&state.db).create(new).await?;
    Ok((StatusCode::CREATED, Json(RecipeResponse::from(recipe))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "updateRecipe",
    summary = "Update a recipe",
    description = "Overwrites title, description and instructions and bumps the last-modified date. Ingredients and owner are not changed.",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload))]
pub async fn update_recipe(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, AppError> {
    let recipe = RecipeStore::new(&state.db)
        .update(id, payload.into())
        .await?;
    Ok(Json(recipe.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "deleteRecipe",
    summary = "Delete a recipe",
    description = "Removes the recipe and its ingredient links. Delete its ratings first; deleting a missing recipe succeeds.",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 409, description = "Recipe still has ratings (CONFLICT)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn delete_recipe(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    RecipeStore::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/ingredients",
    tag = "Recipe Ingredients",
    operation_id = "getRecipeIngredients",
    summary = "List the ingredients of a recipe",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Ingredient links", body = Vec<RecipeIngredientResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn get_recipe_ingredients(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<RecipeIngredientResponse>>, AppError> {
    let entries = RecipeStore::new(&state.db).get_ingredients(id).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/{id}/ingredients",
    tag = "Recipe Ingredients",
    operation_id = "addRecipeIngredient",
    summary = "Add one ingredient to a recipe",
    description = "Unknown ingredient names are created on the fly.",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = IngredientEntryRequest,
    responses(
        (status = 201, description = "Recipe with its ingredients", body = RecipeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Ingredient already on the recipe (CONFLICT)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload), fields(ingredient = %payload.ingredient.name))]
pub async fn add_recipe_ingredient(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<IngredientEntryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let line = payload.into_line()?;
    let recipe = RecipeStore::new(&state.db).add_ingredient(id, line).await?;
    Ok((StatusCode::CREATED, Json(RecipeResponse::from(recipe))))
}

#[utoipa::path(
    post,
    path = "/{id}/ingredients/batch",
    tag = "Recipe Ingredients",
    operation_id = "addRecipeIngredients",
    summary = "Add several ingredients to a recipe",
    description = "All or nothing: if any entry fails, none are added.",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = Vec<IngredientEntryRequest>,
    responses(
        (status = 201, description = "Recipe with its ingredients", body = RecipeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "An ingredient is already on the recipe (CONFLICT)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload), fields(count = payload.len()))]
pub async fn add_recipe_ingredients(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<Vec<IngredientEntryRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let lines = into_lines(payload)?;
    let recipe = RecipeStore::new(&state.db).add_ingredients(id, lines).await?;
    Ok((StatusCode::CREATED, Json(RecipeResponse::from(recipe))))
}

#[utoipa::path(
    put,
    path = "/{id}/ingredients",
    tag = "Recipe Ingredients",
    operation_id = "updateRecipeIngredients",
    summary = "Replace the ingredient list of a recipe",
    description = "Entries are matched to current ingredients by name: matches get the new quantity and unit, current ingredients missing from the list are removed, and new names are added.",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = Vec<IngredientEntryRequest>,
    responses(
        (status = 204, description = "Ingredients reconciled"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload), fields(count = payload.len()))]
pub async fn update_recipe_ingredients(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<Vec<IngredientEntryRequest>>,
) -> Result<StatusCode, AppError> {
    let lines = into_lines(payload)?;
    RecipeStore::new(&state.db)
        .update_ingredients(id, lines)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
