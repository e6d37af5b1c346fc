//! User management controller.

use crate::{
    dto::{UserRequest, UserStats},
    extractors::ValidatedJson,
    responses::{created, now_rfc3339, ok, ok_message, ApiResponse, ApiResult, AppError, ResultExt},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use hoctap_core::{HoctapError, User, UserId};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/stats", get(user_stats))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List all users, newest first.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = [User]),
        (status = 500, description = "Failed to retrieve users")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state
        .repository
        .list_users()
        .await
        .or_fail("Failed to retrieve users")?;
    debug!("Listed {} users", users.len());
    ok("Users retrieved successfully", users)
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    let user_id = parse_user_id(&id)?;
    let user = state
        .repository
        .get_user(user_id)
        .await
        .or_fail("Failed to retrieve user")?;
    ok("User found", user)
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Invalid JSON format or missing fields"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    debug!("Create user request: {}", request.email);

    let user = state
        .repository
        .create_user(&request.name, &request.email)
        .await
        .or_fail("Failed to create user")?;
    Ok(created("User created successfully", user))
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = User),
        (status = 400, description = "Invalid user ID, JSON or fields"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> ApiResult<User> {
    let user_id = parse_user_id(&id)?;
    debug!("Update user request: {}", user_id);

    let user = state
        .repository
        .update_user(user_id, &request.name, &request.email)
        .await
        .or_fail("Failed to update user")?;
    ok("User updated successfully", user)
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let user_id = parse_user_id(&id)?;
    debug!("Delete user request: {}", user_id);

    state
        .repository
        .delete_user(user_id)
        .await
        .or_fail("Failed to delete user")?;
    ok_message("User deleted successfully")
}

/// Count users.
#[utoipa::path(
    get,
    path = "/api/users/stats",
    tag = "users",
    responses(
        (status = 200, description = "Users statistics retrieved successfully", body = UserStats),
        (status = 500, description = "Failed to get users statistics")
    )
)]
pub async fn user_stats(State(state): State<AppState>) -> ApiResult<UserStats> {
    let total_users = state
        .repository
        .count_users()
        .await
        .or_fail("Failed to get users statistics")?;
    ok(
        "Users statistics retrieved successfully",
        UserStats {
            total_users,
            timestamp: now_rfc3339(),
        },
    )
}

/// Helper to parse user ID from path parameter.
fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id).map_err(|_| AppError::from(HoctapError::validation("Invalid user ID")))
}
