use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{
    common::CoreError,
    exercise::entities::ExerciseId,
    user::entities::UserId,
    workout::{
        entities::{
            InsertWorkoutInput, UpdateWorkoutInput, Workout, WorkoutExercise, WorkoutExerciseId,
            WorkoutExerciseInput, WorkoutId, WorkoutType,
        },
        ports::WorkoutRepository,
    },
};

#[derive(sqlx::FromRow)]
struct WorkoutRow {
    id: i64,
    title: String,
    description: Option<String>,
    duration: i32,
    workout_type: String,
    user_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WorkoutRow {
    fn into_workout(self, exercises: Vec<WorkoutExercise>) -> Result<Workout, CoreError> {
        Ok(Workout {
            id: WorkoutId(self.id),
            title: self.title,
            description: self.description,
            duration: self.duration,
            workout_type: self.workout_type.parse::<WorkoutType>()?,
            user_id: self.user_id.map(UserId),
            created_at: self.created_at,
            updated_at: self.updated_at,
            exercises,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WorkoutExerciseRow {
    id: i64,
    workout_id: i64,
    exercise_id: Option<i64>,
    sets: i32,
    repetitions: i32,
    weight: f64,
    duration: i32,
    rest_time: i32,
}

impl From<WorkoutExerciseRow> for WorkoutExercise {
    fn from(row: WorkoutExerciseRow) -> Self {
        WorkoutExercise {
            id: WorkoutExerciseId(row.id),
            workout_id: WorkoutId(row.workout_id),
            exercise_id: row.exercise_id.map(ExerciseId),
            sets: row.sets,
            repetitions: row.repetitions,
            weight: row.weight,
            duration: row.duration,
            rest_time: row.rest_time,
        }
    }
}

const WORKOUT_COLUMNS: &str =
    "id, title, description, duration, workout_type, user_id, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresWorkoutRepository {
    pool: PgPool,
}

impl PostgresWorkoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the exercise entries of every row in one query and attaches them.
    async fn with_exercises(&self, rows: Vec<WorkoutRow>) -> Result<Vec<Workout>, CoreError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let entries = sqlx::query_as::<_, WorkoutExerciseRow>(
            r#"
            SELECT id, workout_id, exercise_id, sets, repetitions, weight, duration, rest_time
            FROM workout_has_exercises
            WHERE workout_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_workout: HashMap<i64, Vec<WorkoutExercise>> = HashMap::new();
        for entry in entries {
            by_workout
                .entry(entry.workout_id)
                .or_default()
                .push(entry.into());
        }

        rows.into_iter()
            .map(|row| {
                let exercises = by_workout.remove(&row.id).unwrap_or_default();
                row.into_workout(exercises)
            })
            .collect()
    }

    async fn insert_entry(
        tx: &mut Transaction<'_, Postgres>,
        workout_id: i64,
        entry: &WorkoutExerciseInput,
    ) -> Result<WorkoutExercise, CoreError> {
        let row = sqlx::query_as::<_, WorkoutExerciseRow>(
            r#"
            INSERT INTO workout_has_exercises
                (workout_id, exercise_id, sets, repetitions, weight, duration, rest_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, workout_id, exercise_id, sets, repetitions, weight, duration, rest_time
            "#,
        )
        .bind(workout_id)
        .bind(entry.exercise_id.map(|id| id.0))
        .bind(entry.sets)
        .bind(entry.repetitions)
        .bind(entry.weight)
        .bind(entry.duration)
        .bind(entry.rest_time)
        .fetch_one(&mut **tx)
        .await?;

        Ok(row.into())
    }
}

impl WorkoutRepository for PostgresWorkoutRepository {
    async fn insert(&self, input: InsertWorkoutInput) -> Result<Workout, CoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, WorkoutRow>(&format!(
            r#"
            INSERT INTO workouts (title, description, duration, workout_type, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {WORKOUT_COLUMNS}
            "#
        ))
        .bind(&input.title)
        .bind(input.description.as_deref())
        .bind(input.duration)
        .bind(input.workout_type.as_str())
        .bind(input.user_id.0)
        .fetch_one(&mut *tx)
        .await?;

        let mut exercises = Vec::with_capacity(input.exercises.len());
        for entry in &input.exercises {
            exercises.push(Self::insert_entry(&mut tx, row.id, entry).await?);
        }

        tx.commit().await?;

        row.into_workout(exercises)
    }

    async fn find_by_id(&self, id: &WorkoutId) -> Result<Option<Workout>, CoreError> {
        let row = sqlx::query_as::<_, WorkoutRow>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_exercises(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Workout>, CoreError> {
        let rows = sqlx::query_as::<_, WorkoutRow>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        self.with_exercises(rows).await
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Workout>, CoreError> {
        let rows = sqlx::query_as::<_, WorkoutRow>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await?;

        self.with_exercises(rows).await
    }

    async fn list_by_user_and_type(
        &self,
        user_id: &UserId,
        workout_type: WorkoutType,
    ) -> Result<Vec<Workout>, CoreError> {
        let rows = sqlx::query_as::<_, WorkoutRow>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE user_id = $1 AND workout_type = $2 ORDER BY id"
        ))
        .bind(user_id.0)
        .bind(workout_type.as_str())
        .fetch_all(&self.pool)
        .await?;

        self.with_exercises(rows).await
    }

    async fn update(&self, input: UpdateWorkoutInput) -> Result<Workout, CoreError> {
        let row = sqlx::query_as::<_, WorkoutRow>(&format!(
            r#"
            UPDATE workouts
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                user_id = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {WORKOUT_COLUMNS}
            "#
        ))
        .bind(input.id.0)
        .bind(input.title.as_deref())
        .bind(input.description.as_deref())
        .bind(input.user_id.0)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CoreError::WorkoutNotFound { id: input.id })?;

        self.with_exercises(vec![row])
            .await?
            .pop()
            .ok_or(CoreError::WorkoutNotFound { id: input.id })
    }

    async fn delete(&self, id: &WorkoutId) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::WorkoutNotFound { id: *id });
        }

        Ok(())
    }

    async fn delete_exercise(
        &self,
        workout_id: &WorkoutId,
        exercise_id: &ExerciseId,
    ) -> Result<(), CoreError> {
        let result = sqlx::query(
            "DELETE FROM workout_has_exercises WHERE workout_id = $1 AND exercise_id = $2",
        )
        .bind(workout_id.0)
        .bind(exercise_id.0)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::WorkoutExerciseNotFound {
                workout_id: *workout_id,
                exercise_id: *exercise_id,
            });
        }

        Ok(())
    }
}
