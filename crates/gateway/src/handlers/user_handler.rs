//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::AppResult;
use domain::{CreateUser, UpdateUser, UserResponse};

use crate::extractors::JsonBody;
use crate::state::AppState;

/// Credentials for authentication
#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthRequest {
    #[serde(default)]
    #[schema(example = "alice")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "secret")]
    pub password: String,
}

/// User payload for create and update.
///
/// `password` is only read on create; `id` is taken from the path on update.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserPayload {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    #[schema(example = "alice")]
    pub name: String,
    /// Decimal integer
    #[serde(default)]
    #[schema(example = "30")]
    pub age: String,
    #[serde(default)]
    pub additional_information: String,
    #[serde(default)]
    pub parents: Vec<String>,
}

/// Plain message response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User authenticated!")]
    pub message: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user))
        .route("/user/auth", post(authenticate))
        .route(
            "/user/:id",
            get(get_user).post(update_user).delete(delete_user),
        )
}

/// Check a name/password pair
#[utoipa::path(
    post,
    path = "/user/auth",
    tag = "Users",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = MessageResponse),
        (status = 400, description = "Missing name or password"),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "User not found")
    )
)]
pub async fn authenticate(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AuthRequest>,
) -> AppResult<Json<MessageResponse>> {
    let message = state
        .users
        .authenticate(&payload.name, &payload.password)
        .await?;
    Ok(Json(MessageResponse { message }))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error or duplicate name")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let request = CreateUser {
        name: payload.name,
        password: payload.password,
        age: payload.age,
        additional_information: payload.additional_information,
        parents: payload.parents,
    };

    let user = state.users.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.get_user(&id).await?;
    Ok(Json(user))
}

/// Replace user details
#[utoipa::path(
    post,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> AppResult<Json<UserResponse>> {
    let request = UpdateUser {
        id,
        name: payload.name,
        age: payload.age,
        additional_information: payload.additional_information,
        parents: payload.parents,
    };

    let user = state.users.update_user(request).await?;
    Ok(Json(user))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let message = state.users.delete_user(&id).await?;
    Ok(Json(MessageResponse { message }))
}
