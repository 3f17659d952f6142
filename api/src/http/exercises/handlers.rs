use axum::{
    Json,
    extract::{Path, Query, State},
};
use axum_extra::extract::WithRejection;
use healthhub_core::domain::exercise::{
    entities::{Exercise, ExerciseId, InsertExerciseInput, MuscleGroup},
    ports::ExerciseService,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::http::server::{ApiError, ApiJson, ApiPath, ApiQuery, AppState, Response};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MuscleGroupQuery {
    pub muscle_group: MuscleGroup,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TitleQuery {
    /// Case-insensitive fragment of the exercise title.
    pub title: String,
}

#[utoipa::path(
    get,
    path = "/api/exercise/all",
    tag = "exercises",
    responses(
        (status = 200, description = "Every exercise", body = Vec<Exercise>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_exercises(
    State(state): State<AppState>,
) -> Result<Response<Vec<Exercise>>, ApiError> {
    let exercises = state.service.list_exercises().await?;
    Ok(Response::ok(exercises))
}

#[utoipa::path(
    get,
    path = "/api/exercise/{id}",
    tag = "exercises",
    params(
        ("id" = i64, Path, description = "Exercise ID")
    ),
    responses(
        (status = 200, description = "Exercise retrieved successfully", body = Exercise),
        (status = 404, description = "Exercise not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_exercise(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Response<Exercise>, ApiError> {
    let exercise = state.service.get_exercise(&ExerciseId(id)).await?;
    Ok(Response::ok(exercise))
}

#[utoipa::path(
    get,
    path = "/api/exercise/muscle-groups",
    tag = "exercises",
    responses(
        (status = 200, description = "Every muscle group", body = Vec<MuscleGroup>)
    )
)]
pub async fn muscle_groups(State(state): State<AppState>) -> Response<Vec<MuscleGroup>> {
    Response::ok(state.service.muscle_groups())
}

#[utoipa::path(
    get,
    path = "/api/exercise/exercises-by-muscle-group",
    tag = "exercises",
    params(MuscleGroupQuery),
    responses(
        (status = 200, description = "Exercises training the muscle group", body = Vec<Exercise>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_by_muscle_group(
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<MuscleGroupQuery>,
) -> Result<Response<Vec<Exercise>>, ApiError> {
    let exercises = state
        .service
        .list_by_muscle_group(query.muscle_group)
        .await?;
    Ok(Response::ok(exercises))
}

#[utoipa::path(
    get,
    path = "/api/exercise/exercises-by-title",
    tag = "exercises",
    params(TitleQuery),
    responses(
        (status = 200, description = "Exercises whose title contains the fragment", body = Vec<Exercise>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search_by_title(
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<TitleQuery>,
) -> Result<Response<Vec<Exercise>>, ApiError> {
    let exercises = state.service.search_by_title(&query.title).await?;
    Ok(Response::ok(exercises))
}

#[utoipa::path(
    post,
    path = "/api/exercise",
    tag = "exercises",
    request_body = InsertExerciseInput,
    responses(
        (status = 201, description = "Exercise created successfully", body = Exercise),
        (status = 400, description = "Bad request - Blank title"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn create_exercise(
    State(state): State<AppState>,
    WithRejection(Json(input), _): ApiJson<InsertExerciseInput>,
) -> Result<Response<Exercise>, ApiError> {
    let exercise = state.service.create_exercise(input).await?;
    Ok(Response::created(exercise))
}
