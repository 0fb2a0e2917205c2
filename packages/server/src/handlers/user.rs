use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthenticatedPrincipal;
use crate::extractors::json::AppJson;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::services::UserDirectory;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List all users",
    responses(
        (status = 200, description = "All user profiles", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn list_users(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = UserDirectory::new(&state.db).list_all().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{email}",
    tag = "Users",
    operation_id = "getUser",
    summary = "Get a user by email",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn get_user(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserDirectory::new(&state.db).get_by_email(&email).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Users",
    operation_id = "createUser",
    summary = "Create a user",
    description = "The join date defaults to today.",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 409, description = "Email already registered (CONFLICT)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload), fields(email = %payload.email))]
pub async fn create_user(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new = payload.into_new_user()?;
    let user = UserDirectory::new(&state.db).create(new).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    put,
    path = "/{email}",
    tag = "Users",
    operation_id = "updateUser",
    summary = "Update a user's name and email",
    params(("email" = String, Path, description = "Current email of the user")),
    request_body = UpdateUserRequest,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "New email already registered (CONFLICT)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal, payload))]
pub async fn update_user(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(email): Path<String>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<StatusCode, AppError> {
    let patch = payload.into_patch()?;
    UserDirectory::new(&state.db).update(&email, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/{email}",
    tag = "Users",
    operation_id = "deleteUser",
    summary = "Delete a user by email",
    description = "Recipes, pantry entries and ratings of the user are kept. Deleting a missing user succeeds.",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING)", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, _principal))]
pub async fn delete_user(
    _principal: AuthenticatedPrincipal,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<StatusCode, AppError> {
    UserDirectory::new(&state.db).delete_by_email(&email).await?;
    Ok(StatusCode::NO_CONTENT)
}
