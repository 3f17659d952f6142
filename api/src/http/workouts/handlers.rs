use axum::{
    Json,
    extract::{Path, Query, State},
};
use axum_extra::extract::WithRejection;
use healthhub_core::domain::{
    exercise::entities::ExerciseId,
    user::entities::UserId,
    workout::{
        entities::{
            CreateWorkoutRequest, UpdateWorkoutRequest, Workout, WorkoutDetails, WorkoutId,
            WorkoutType,
        },
        ports::WorkoutService,
    },
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::http::server::{ApiError, ApiJson, ApiPath, ApiQuery, AppState, Response};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    pub user_id: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WorkoutTypeQuery {
    pub user_id: i64,
    pub workout_type: WorkoutType,
}

#[utoipa::path(
    get,
    path = "/api/workout/all",
    tag = "workouts",
    responses(
        (status = 200, description = "Every workout", body = Vec<Workout>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_workouts(
    State(state): State<AppState>,
) -> Result<Response<Vec<Workout>>, ApiError> {
    let workouts = state.service.list_workouts().await?;
    Ok(Response::ok(workouts))
}

#[utoipa::path(
    get,
    path = "/api/workout/{id}",
    tag = "workouts",
    params(
        ("id" = i64, Path, description = "Workout ID")
    ),
    responses(
        (status = 200, description = "Workout with its exercises and owner", body = WorkoutDetails),
        (status = 404, description = "Workout not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_workout(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Response<WorkoutDetails>, ApiError> {
    let workout = state.service.get_workout(&WorkoutId(id)).await?;
    Ok(Response::ok(workout))
}

#[utoipa::path(
    get,
    path = "/api/workout/user-workouts",
    tag = "workouts",
    params(UserIdQuery),
    responses(
        (status = 200, description = "Workouts owned by the user", body = Vec<Workout>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_workouts_by_user(
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<UserIdQuery>,
) -> Result<Response<Vec<Workout>>, ApiError> {
    let workouts = state
        .service
        .list_workouts_by_user(&UserId(query.user_id))
        .await?;
    Ok(Response::ok(workouts))
}

#[utoipa::path(
    get,
    path = "/api/workout/user-workouts-by-workout-type",
    tag = "workouts",
    params(WorkoutTypeQuery),
    responses(
        (status = 200, description = "Workouts owned by the user with the given type", body = Vec<Workout>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_workouts_by_type(
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<WorkoutTypeQuery>,
) -> Result<Response<Vec<Workout>>, ApiError> {
    let workouts = state
        .service
        .list_workouts_by_type(&UserId(query.user_id), query.workout_type)
        .await?;
    Ok(Response::ok(workouts))
}

#[utoipa::path(
    get,
    path = "/api/workout/workout-types",
    tag = "workouts",
    responses(
        (status = 200, description = "Every workout type", body = Vec<WorkoutType>)
    )
)]
pub async fn workout_types(State(state): State<AppState>) -> Response<Vec<WorkoutType>> {
    Response::ok(state.service.workout_types())
}

#[utoipa::path(
    post,
    path = "/api/workout",
    tag = "workouts",
    params(UserIdQuery),
    request_body = CreateWorkoutRequest,
    responses(
        (status = 201, description = "Workout created successfully", body = Workout),
        (status = 400, description = "Bad request - Blank title"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn create_workout(
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<UserIdQuery>,
    WithRejection(Json(request), _): ApiJson<CreateWorkoutRequest>,
) -> Result<Response<Workout>, ApiError> {
    let input = request.into_input(UserId(query.user_id));
    let workout = state.service.create_workout(input).await?;
    Ok(Response::created(workout))
}

#[utoipa::path(
    put,
    path = "/api/workout/{id}",
    tag = "workouts",
    params(
        ("id" = i64, Path, description = "Workout ID"),
        UserIdQuery
    ),
    request_body = UpdateWorkoutRequest,
    responses(
        (status = 200, description = "Workout updated successfully, returns its id", body = i64),
        (status = 404, description = "Workout or user not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn update_workout(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<UserIdQuery>,
    WithRejection(Json(request), _): ApiJson<UpdateWorkoutRequest>,
) -> Result<Response<WorkoutId>, ApiError> {
    let input = request.into_input(WorkoutId(id), UserId(query.user_id));
    let workout = state.service.update_workout(input).await?;
    Ok(Response::ok(workout.id))
}

#[utoipa::path(
    delete,
    path = "/api/workout/{id}/exercises/{exercise_id}",
    tag = "workouts",
    params(
        ("id" = i64, Path, description = "Workout ID"),
        ("exercise_id" = i64, Path, description = "Exercise ID")
    ),
    responses(
        (status = 204, description = "Exercise removed from the workout"),
        (status = 404, description = "Exercise not part of the workout"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_workout_exercise(
    WithRejection(Path((id, exercise_id)), _): ApiPath<(i64, i64)>,
    State(state): State<AppState>,
) -> Result<Response<()>, ApiError> {
    state
        .service
        .delete_workout_exercise(&WorkoutId(id), &ExerciseId(exercise_id))
        .await?;
    Ok(Response::deleted(()))
}

#[utoipa::path(
    delete,
    path = "/api/workout/{id}",
    tag = "workouts",
    params(
        ("id" = i64, Path, description = "Workout ID")
    ),
    responses(
        (status = 204, description = "Workout deleted along with its schedule"),
        (status = 404, description = "Workout not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_workout(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Response<()>, ApiError> {
    state.service.delete_workout(&WorkoutId(id)).await?;
    Ok(Response::deleted(()))
}
