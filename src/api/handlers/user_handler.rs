//! User handlers.
//!
//! Every operation answers `200 OK`. A user that does not exist is not an
//! error: reads return `{}` and writes do nothing.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;

use crate::api::extractors::JsonBody;
use crate::api::AppState;
use crate::domain::{User, UserFields};
use crate::errors::AppResult;
use crate::services::UserLookup;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = UserFields,
    responses(
        (status = 200, description = "The submitted body, unchanged", body = UserFields),
        (status = 400, description = "Malformed JSON body")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<Value>> {
    let echoed = state.user_service.create(body).await?;
    Ok(Json(echoed))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every stored user", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.user_service.list().await?;
    Ok(Json(users))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The user, or `{}` when no user has this id", body = User)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserLookup>> {
    let user = state.user_service.read_one(&id).await?;
    Ok(Json(user))
}

/// Update user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserFields,
    responses(
        (status = 200, description = "The submitted body, unchanged", body = UserFields),
        (status = 400, description = "Malformed JSON body")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<Value>> {
    let echoed = state.user_service.update(&id, body).await?;
    Ok(Json(echoed))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The request body, or `{}` when none was sent")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<Value>> {
    let echoed = state.user_service.delete(&id, body).await?;
    Ok(Json(echoed))
}
