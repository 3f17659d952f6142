use thiserror::Error;

use crate::domain::{
    exercise::entities::ExerciseId, schedule::entities::ScheduledWorkoutId,
    user::entities::UserId, workout::entities::WorkoutId,
};

pub mod services;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Service is currently unavailable")]
    ServiceUnavailable(String),

    #[error("User with id: {id} does not exist")]
    UserNotFound { id: UserId },

    #[error("Workout with id: {id} does not exist")]
    WorkoutNotFound { id: WorkoutId },

    #[error("Exercise with id: {id} does not exist")]
    ExerciseNotFound { id: ExerciseId },

    #[error("Scheduled workout not found with id: {id}")]
    ScheduledWorkoutNotFound { id: ScheduledWorkoutId },

    #[error("Exercise with id: {exercise_id} in workout with id: {workout_id} could not be found")]
    WorkoutExerciseNotFound {
        workout_id: WorkoutId,
        exercise_id: ExerciseId,
    },

    #[error("Username: {username} is already taken")]
    UsernameTaken { username: String },

    #[error("Username cannot be empty")]
    InvalidUsername,

    #[error("Workout title cannot be empty")]
    InvalidWorkoutTitle,

    #[error("Exercise title cannot be empty")]
    InvalidExerciseTitle,

    #[error("Requires a password")]
    MissingPassword,

    #[error("Authentication failed")]
    InvalidCredentials,

    #[error("A recurring workout needs at least one day of the week")]
    EmptyRecurringDays,

    #[error("Look-back period cannot be negative, got {days} days")]
    InvalidLookback { days: i64 },

    #[error("Health check failed")]
    Unhealthy,

    #[error("Database error: {msg}")]
    DatabaseError { msg: String },

    #[error("An unknown error occurred: {message}")]
    UnknownError { message: String },
}

impl From<sqlx::Error> for CoreError {
    fn from(error: sqlx::Error) -> Self {
        CoreError::DatabaseError {
            msg: error.to_string(),
        }
    }
}
