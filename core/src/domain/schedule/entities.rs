use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::CoreError,
    user::entities::UserId,
    workout::entities::{WorkoutId, WorkoutType},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[schema(value_type = i64)]
pub struct ScheduledWorkoutId(pub i64);

impl std::fmt::Display for ScheduledWorkoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ScheduledWorkoutId {
    fn from(id: i64) -> Self {
        ScheduledWorkoutId(id)
    }
}

impl From<ScheduledWorkoutId> for i64 {
    fn from(id: ScheduledWorkoutId) -> Self {
        id.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[schema(value_type = i64)]
pub struct RecurringWorkoutId(pub i64);

impl From<i64> for RecurringWorkoutId {
    fn from(id: i64) -> Self {
        RecurringWorkoutId(id)
    }
}

/// Day of the week, ordered Monday first.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }

    pub fn num_days_from_monday(&self) -> u32 {
        self.weekday().num_days_from_monday()
    }

    pub fn weekday(&self) -> Weekday {
        match self {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        DayOfWeek::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl FromStr for DayOfWeek {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| CoreError::UnknownError {
                message: format!("unknown day of week '{s}'"),
            })
    }
}

/// A workout placed on a user's calendar (one row of `user_has_workouts`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledWorkout {
    pub id: ScheduledWorkoutId,
    pub user_id: UserId,
    pub workout_id: WorkoutId,
    pub workout_title: String,
    pub workout_type: WorkoutType,

    #[schema(value_type = String, format = DateTime)]
    pub scheduled_at: DateTime<Utc>,
    pub completed: bool,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertScheduledWorkoutInput {
    pub user_id: UserId,
    pub workout_id: WorkoutId,
    #[schema(value_type = String, format = DateTime)]
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduledWorkoutInput {
    pub id: ScheduledWorkoutId,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduledWorkoutRequest {
    #[schema(value_type = Option<String>, format = DateTime)]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

impl UpdateScheduledWorkoutRequest {
    pub fn into_input(self, id: ScheduledWorkoutId) -> UpdateScheduledWorkoutInput {
        UpdateScheduledWorkoutInput {
            id,
            scheduled_at: self.scheduled_at,
            completed: self.completed,
        }
    }
}

/// Template that repeats a workout every week on the given days.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecurringWorkout {
    pub id: RecurringWorkoutId,
    pub user_id: UserId,
    pub workout_id: WorkoutId,
    #[schema(value_type = String, example = "07:30:00")]
    pub time_of_day: NaiveTime,
    pub days_of_week: Vec<DayOfWeek>,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertRecurringWorkoutInput {
    pub user_id: UserId,
    pub workout_id: WorkoutId,
    pub days_of_week: Vec<DayOfWeek>,
    #[schema(value_type = String, example = "07:30:00")]
    pub time_of_day: NaiveTime,
}

/// Inclusive range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        &self.start <= instant && instant <= &self.end
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
pub struct WorkoutCompletion {
    pub complete: u64,
    pub incomplete: u64,
    pub percentage: u64,
}

/// Number of completed workouts per workout type.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct WorkoutFavourite {
    pub strength: u64,
    pub cardio: u64,
    pub mobility: u64,
}
