use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::CoreError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[schema(value_type = i64)]
pub struct ExerciseId(pub i64);

impl std::fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ExerciseId {
    fn from(id: i64) -> Self {
        ExerciseId(id)
    }
}

impl From<ExerciseId> for i64 {
    fn from(exercise_id: ExerciseId) -> Self {
        exercise_id.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Forearms,
    Abs,
    Obliques,
    Quadriceps,
    Hamstrings,
    Glutes,
    Calves,
    FullBody,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 13] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Shoulders,
        MuscleGroup::Biceps,
        MuscleGroup::Triceps,
        MuscleGroup::Forearms,
        MuscleGroup::Abs,
        MuscleGroup::Obliques,
        MuscleGroup::Quadriceps,
        MuscleGroup::Hamstrings,
        MuscleGroup::Glutes,
        MuscleGroup::Calves,
        MuscleGroup::FullBody,
    ];

    /// Column value used by the `exercise_muscle_groups` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "CHEST",
            MuscleGroup::Back => "BACK",
            MuscleGroup::Shoulders => "SHOULDERS",
            MuscleGroup::Biceps => "BICEPS",
            MuscleGroup::Triceps => "TRICEPS",
            MuscleGroup::Forearms => "FOREARMS",
            MuscleGroup::Abs => "ABS",
            MuscleGroup::Obliques => "OBLIQUES",
            MuscleGroup::Quadriceps => "QUADRICEPS",
            MuscleGroup::Hamstrings => "HAMSTRINGS",
            MuscleGroup::Glutes => "GLUTES",
            MuscleGroup::Calves => "CALVES",
            MuscleGroup::FullBody => "FULL_BODY",
        }
    }
}

impl FromStr for MuscleGroup {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MuscleGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| CoreError::UnknownError {
                message: format!("unknown muscle group '{s}'"),
            })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExerciseDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseDifficulty::Beginner => "BEGINNER",
            ExerciseDifficulty::Intermediate => "INTERMEDIATE",
            ExerciseDifficulty::Advanced => "ADVANCED",
        }
    }
}

impl FromStr for ExerciseDifficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BEGINNER" => Ok(ExerciseDifficulty::Beginner),
            "INTERMEDIATE" => Ok(ExerciseDifficulty::Intermediate),
            "ADVANCED" => Ok(ExerciseDifficulty::Advanced),
            other => Err(CoreError::UnknownError {
                message: format!("unknown exercise difficulty '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: ExerciseId,
    pub title: String,
    pub description: Option<String>,
    pub exercise_difficulty: Option<ExerciseDifficulty>,
    pub video_guide: Option<String>,
    pub muscle_groups: Vec<MuscleGroup>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertExerciseInput {
    pub title: String,
    pub description: Option<String>,
    pub exercise_difficulty: Option<ExerciseDifficulty>,
    pub video_guide: Option<String>,
    #[serde(default)]
    pub muscle_groups: Vec<MuscleGroup>,
}
