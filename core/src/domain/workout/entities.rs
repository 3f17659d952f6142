use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::CoreError,
    exercise::entities::ExerciseId,
    user::entities::{UserId, UserSummary},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[schema(value_type = i64)]
pub struct WorkoutId(pub i64);

impl std::fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for WorkoutId {
    fn from(id: i64) -> Self {
        WorkoutId(id)
    }
}

impl From<WorkoutId> for i64 {
    fn from(workout_id: WorkoutId) -> Self {
        workout_id.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[schema(value_type = i64)]
pub struct WorkoutExerciseId(pub i64);

impl From<i64> for WorkoutExerciseId {
    fn from(id: i64) -> Self {
        WorkoutExerciseId(id)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkoutType {
    Strength,
    Cardio,
    Mobility,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 3] = [
        WorkoutType::Strength,
        WorkoutType::Cardio,
        WorkoutType::Mobility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Strength => "STRENGTH",
            WorkoutType::Cardio => "CARDIO",
            WorkoutType::Mobility => "MOBILITY",
        }
    }
}

impl FromStr for WorkoutType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkoutType::ALL
            .into_iter()
            .find(|workout_type| workout_type.as_str() == s)
            .ok_or_else(|| CoreError::UnknownError {
                message: format!("unknown workout type '{s}'"),
            })
    }
}

/// One exercise slot inside a workout, with its training parameters.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub id: WorkoutExerciseId,
    pub workout_id: WorkoutId,
    pub exercise_id: Option<ExerciseId>,
    pub sets: i32,
    pub repetitions: i32,
    pub weight: f64,
    pub duration: i32,
    pub rest_time: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: WorkoutId,
    pub title: String,
    pub description: Option<String>,
    pub duration: i32,
    pub workout_type: WorkoutType,
    pub user_id: Option<UserId>,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,

    pub exercises: Vec<WorkoutExercise>,
}

/// A workout together with its owner, as returned by the single-workout view.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDetails {
    pub id: WorkoutId,
    pub title: String,
    pub description: Option<String>,
    pub duration: i32,
    pub workout_type: WorkoutType,
    pub exercises: Vec<WorkoutExercise>,
    pub user: Option<UserSummary>,
}

impl WorkoutDetails {
    pub fn new(workout: Workout, user: Option<UserSummary>) -> Self {
        WorkoutDetails {
            id: workout.id,
            title: workout.title,
            description: workout.description,
            duration: workout.duration,
            workout_type: workout.workout_type,
            exercises: workout.exercises,
            user,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExerciseInput {
    pub exercise_id: Option<ExerciseId>,
    #[serde(default)]
    pub sets: i32,
    #[serde(default)]
    pub repetitions: i32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub rest_time: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertWorkoutInput {
    pub title: String,
    pub description: Option<String>,
    pub duration: i32,
    pub workout_type: WorkoutType,
    pub user_id: UserId,
    pub exercises: Vec<WorkoutExerciseInput>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub duration: i32,
    pub workout_type: WorkoutType,
    #[serde(default)]
    pub exercises: Vec<WorkoutExerciseInput>,
}

impl CreateWorkoutRequest {
    pub fn into_input(self, user_id: UserId) -> InsertWorkoutInput {
        InsertWorkoutInput {
            title: self.title,
            description: self.description,
            duration: self.duration,
            workout_type: self.workout_type,
            user_id,
            exercises: self.exercises,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutInput {
    pub id: WorkoutId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_id: UserId,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl UpdateWorkoutRequest {
    pub fn into_input(self, id: WorkoutId, user_id: UserId) -> UpdateWorkoutInput {
        UpdateWorkoutInput {
            id,
            title: self.title,
            description: self.description,
            user_id,
        }
    }
}
