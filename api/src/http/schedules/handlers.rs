use axum::{
    Json,
    extract::{Path, Query, State},
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, FixedOffset};
use healthhub_core::domain::{
    schedule::{
        calendar::DEFAULT_LOOKBACK_DAYS,
        entities::{
            InsertRecurringWorkoutInput, InsertScheduledWorkoutInput, RecurringWorkout,
            ScheduledWorkout, ScheduledWorkoutId, UpdateScheduledWorkoutRequest,
            WorkoutCompletion, WorkoutFavourite,
        },
        ports::ScheduleService,
    },
    user::{entities::UserId, ports::UserService},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::http::server::{ApiError, ApiJson, ApiPath, ApiQuery, AppState, Response};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateQuery {
    /// ISO-8601 date-time with offset, e.g. `2024-03-11T08:00:00+02:00`.
    /// The day or week is taken in that offset.
    pub date: String,
}

impl DateQuery {
    /// Parses the date, tolerating a `+` offset decoded as a space by
    /// form-urlencoding.
    pub fn parse(&self) -> Result<DateTime<FixedOffset>, ApiError> {
        let raw = self.date.trim();
        DateTime::parse_from_rfc3339(raw)
            .or_else(|error| match restore_offset_sign(raw) {
                Some(restored) => DateTime::parse_from_rfc3339(&restored),
                None => Err(error),
            })
            .map_err(|e| ApiError::BadRequest {
                message: format!("Invalid date '{}': {e}", self.date),
            })
    }
}

/// Turns a trailing ` HH:MM` back into `+HH:MM`. Spaces elsewhere are left
/// alone since RFC 3339 allows one between date and time.
fn restore_offset_sign(raw: &str) -> Option<String> {
    let split = raw.len().checked_sub(6)?;
    let (head, offset) = raw.split_at_checked(split)?;
    let digits = offset.as_bytes();
    let is_offset = digits[0] == b' '
        && digits[1].is_ascii_digit()
        && digits[2].is_ascii_digit()
        && digits[3] == b':'
        && digits[4].is_ascii_digit()
        && digits[5].is_ascii_digit();
    is_offset.then(|| format!("{head}+{}", &offset[1..]))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompletionQuery {
    /// Look-back period in days, 91 by default.
    #[serde(default = "default_lookback_days")]
    pub days: i64,
}

fn default_lookback_days() -> i64 {
    DEFAULT_LOOKBACK_DAYS
}

/// Resolves the user first so that views over an unknown user answer 404
/// instead of an empty list.
async fn existing_user(state: &AppState, id: i64) -> Result<UserId, ApiError> {
    let user = state.service.get_user(&UserId(id)).await?;
    Ok(user.id)
}

#[utoipa::path(
    get,
    path = "/api/user/{id}/scheduled-workouts",
    tag = "schedule",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Every scheduled workout of the user, by time", body = Vec<ScheduledWorkout>),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_scheduled_workouts(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Response<Vec<ScheduledWorkout>>, ApiError> {
    let user_id = existing_user(&state, id).await?;
    let workouts = state.service.list_scheduled_workouts(&user_id).await?;
    Ok(Response::ok(workouts))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}/scheduled-workouts-for-date",
    tag = "schedule",
    params(
        ("id" = i64, Path, description = "User ID"),
        DateQuery
    ),
    responses(
        (status = 200, description = "Scheduled workouts on the calendar day of `date`", body = Vec<ScheduledWorkout>),
        (status = 400, description = "Bad request - Invalid date"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn scheduled_workouts_for_date(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<DateQuery>,
) -> Result<Response<Vec<ScheduledWorkout>>, ApiError> {
    let date = query.parse()?;
    let user_id = existing_user(&state, id).await?;
    let workouts = state
        .service
        .scheduled_workouts_for_date(&user_id, date)
        .await?;
    Ok(Response::ok(workouts))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}/scheduled-workouts-for-week",
    tag = "schedule",
    params(
        ("id" = i64, Path, description = "User ID"),
        DateQuery
    ),
    responses(
        (status = 200, description = "Scheduled workouts in the Monday-to-Sunday week of `date`", body = Vec<ScheduledWorkout>),
        (status = 400, description = "Bad request - Invalid date"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn scheduled_workouts_for_week(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<DateQuery>,
) -> Result<Response<Vec<ScheduledWorkout>>, ApiError> {
    let date = query.parse()?;
    let user_id = existing_user(&state, id).await?;
    let workouts = state
        .service
        .scheduled_workouts_for_week(&user_id, date)
        .await?;
    Ok(Response::ok(workouts))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}/recurring-workouts-for-week",
    tag = "schedule",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Recurring workout templates of the user", body = Vec<RecurringWorkout>),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn recurring_workouts(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Response<Vec<RecurringWorkout>>, ApiError> {
    let user_id = existing_user(&state, id).await?;
    let templates = state.service.recurring_workouts(&user_id).await?;
    Ok(Response::ok(templates))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}/workout-completion",
    tag = "schedule",
    params(
        ("id" = i64, Path, description = "User ID"),
        CompletionQuery
    ),
    responses(
        (status = 200, description = "Completed and missed workouts over the look-back period", body = WorkoutCompletion),
        (status = 400, description = "Bad request - Negative look-back"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn workout_completion(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<CompletionQuery>,
) -> Result<Response<WorkoutCompletion>, ApiError> {
    let user_id = existing_user(&state, id).await?;
    let completion = state
        .service
        .workout_completion(&user_id, query.days)
        .await?;
    Ok(Response::ok(completion))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}/workout-favourite",
    tag = "schedule",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Completed workouts per workout type", body = WorkoutFavourite),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn workout_favourite(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Response<WorkoutFavourite>, ApiError> {
    let user_id = existing_user(&state, id).await?;
    let favourite = state.service.workout_favourite(&user_id).await?;
    Ok(Response::ok(favourite))
}

#[utoipa::path(
    post,
    path = "/api/user/scheduled-workouts",
    tag = "schedule",
    request_body = InsertScheduledWorkoutInput,
    responses(
        (status = 201, description = "Workout scheduled, returns the scheduled workout id", body = i64),
        (status = 404, description = "User or workout not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn schedule_workout(
    State(state): State<AppState>,
    WithRejection(Json(input), _): ApiJson<InsertScheduledWorkoutInput>,
) -> Result<Response<ScheduledWorkoutId>, ApiError> {
    let id = state.service.schedule_workout(input).await?;
    Ok(Response::created(id))
}

#[utoipa::path(
    post,
    path = "/api/user/recurring-workouts",
    tag = "schedule",
    request_body = InsertRecurringWorkoutInput,
    responses(
        (status = 201, description = "Recurring workout expanded, returns the ids of the generated occurrences", body = Vec<i64>),
        (status = 400, description = "Bad request - No days of the week"),
        (status = 404, description = "User or workout not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn schedule_recurring_workout(
    State(state): State<AppState>,
    WithRejection(Json(input), _): ApiJson<InsertRecurringWorkoutInput>,
) -> Result<Response<Vec<ScheduledWorkoutId>>, ApiError> {
    let ids = state.service.schedule_recurring_workout(input).await?;
    Ok(Response::created(ids))
}

#[utoipa::path(
    put,
    path = "/api/user/scheduled-workouts/{id}",
    tag = "schedule",
    params(
        ("id" = i64, Path, description = "Scheduled workout ID")
    ),
    request_body = UpdateScheduledWorkoutRequest,
    responses(
        (status = 200, description = "Scheduled workout updated", body = ScheduledWorkout),
        (status = 404, description = "Scheduled workout not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn update_scheduled_workout(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
    WithRejection(Json(request), _): ApiJson<UpdateScheduledWorkoutRequest>,
) -> Result<Response<ScheduledWorkout>, ApiError> {
    let input = request.into_input(ScheduledWorkoutId(id));
    let workout = state.service.update_scheduled_workout(input).await?;
    Ok(Response::ok(workout))
}

#[utoipa::path(
    delete,
    path = "/api/user/scheduled-workouts/{id}",
    tag = "schedule",
    params(
        ("id" = i64, Path, description = "Scheduled workout ID")
    ),
    responses(
        (status = 204, description = "Scheduled workout deleted"),
        (status = 404, description = "Scheduled workout not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_scheduled_workout(
    WithRejection(Path(id), _): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Response<()>, ApiError> {
    state
        .service
        .delete_scheduled_workout(&ScheduledWorkoutId(id))
        .await?;
    Ok(Response::deleted(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> DateQuery {
        DateQuery {
            date: raw.to_string(),
        }
    }

    #[test]
    fn parse_accepts_t_and_space_separators() {
        let with_t = date("2024-03-11T08:00:00+02:00").parse().unwrap();
        let with_space = date("2024-03-11 08:00:00+02:00").parse().unwrap();

        assert_eq!(with_t, with_space);
        assert_eq!(with_t.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn parse_restores_plus_decoded_as_space() {
        let parsed = date("2024-03-11T08:00:00 02:00").parse().unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);

        let both = date("2024-03-11 08:00:00 05:30").parse().unwrap();
        assert_eq!(both.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn parse_keeps_negative_offsets_and_zulu() {
        let negative = date("2024-03-11T08:00:00-05:00").parse().unwrap();
        assert_eq!(negative.offset().local_minus_utc(), -5 * 3600);

        let zulu = date(" 2024-03-11T08:00:00Z ").parse().unwrap();
        assert_eq!(zulu.offset().local_minus_utc(), 0);
    }

    #[test]
    fn parse_rejects_garbage() {
        for raw in ["yesterday", "", "2024-03-11", "2024-03-11T08:00:00 2:00"] {
            let result = date(raw).parse();
            assert!(
                matches!(result, Err(ApiError::BadRequest { .. })),
                "{raw:?} should be rejected"
            );
        }
    }
}
