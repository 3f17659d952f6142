use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use healthhub_core::domain::{
    user::{
        entities::{CreateUserRequest, UpdateUserRequest, User, UserId, UserSummary},
        ports::UserService,
    },
    workout::{entities::Workout, ports::WorkoutService},
};

use crate::http::server::{ApiError, ApiJson, ApiPath, AppState, Response};

#[utoipa::path(
    get,
    path = "/api/user/all",
    tag = "users",
    responses(
        (status = 200, description = "List of users retrieved successfully", body = Vec<UserSummary>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Response<Vec<UserSummary>>, ApiError> {
    let users = state.service.list_users().await?;
    Ok(Response::ok(users))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = User),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_user(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Response<User>, ApiError> {
    let user = state.service.get_user(&UserId(id)).await?;
    Ok(Response::ok(user))
}

#[utoipa::path(
    post,
    path = "/api/user",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully, returns its id", body = i64),
        (status = 400, description = "Bad request - Blank username"),
        (status = 409, description = "Username already taken"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn create_user(
    State(state): State<AppState>,
    WithRejection(Json(request), _): ApiJson<CreateUserRequest>,
) -> Result<Response<UserId>, ApiError> {
    let user = state.service.create_user(request.into_input()).await?;
    Ok(Response::created(user.id))
}

#[utoipa::path(
    put,
    path = "/api/user/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully, returns its id", body = i64),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already taken"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn update_user(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
    WithRejection(Json(request), _): ApiJson<UpdateUserRequest>,
) -> Result<Response<UserId>, ApiError> {
    let user = state
        .service
        .update_user(request.into_input(UserId(id)))
        .await?;
    Ok(Response::ok(user.id))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}/workouts",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Workouts owned by the user", body = Vec<Workout>),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_user_workouts(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Response<Vec<Workout>>, ApiError> {
    let user_id = UserId(id);
    // Unknown users get a 404 rather than an empty list
    state.service.get_user(&user_id).await?;
    let workouts = state.service.list_workouts_by_user(&user_id).await?;
    Ok(Response::ok(workouts))
}
