use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;

use crate::domain::{
    common::CoreError,
    schedule::{
        entities::{
            DateWindow, DayOfWeek, InsertRecurringWorkoutInput, InsertScheduledWorkoutInput,
            RecurringWorkout, RecurringWorkoutId, ScheduledWorkout, ScheduledWorkoutId,
            UpdateScheduledWorkoutInput,
        },
        ports::{RecurringWorkoutRepository, ScheduledWorkoutRepository},
    },
    user::entities::UserId,
    workout::entities::{WorkoutId, WorkoutType},
};

/// Selects scheduled rows joined with their workout. `uw` must be bound to a
/// relation shaped like `user_has_workouts`.
const SELECT_SCHEDULED: &str = r#"
    SELECT uw.id, uw.user_id, uw.workout_id, w.title AS workout_title, w.workout_type,
           uw.scheduled_at, uw.completed, uw.updated_at
"#;

#[derive(sqlx::FromRow)]
struct ScheduledWorkoutRow {
    id: i64,
    user_id: i64,
    workout_id: i64,
    workout_title: String,
    workout_type: String,
    scheduled_at: DateTime<Utc>,
    completed: bool,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<ScheduledWorkoutRow> for ScheduledWorkout {
    type Error = CoreError;

    fn try_from(row: ScheduledWorkoutRow) -> Result<Self, Self::Error> {
        Ok(ScheduledWorkout {
            id: ScheduledWorkoutId(row.id),
            user_id: UserId(row.user_id),
            workout_id: WorkoutId(row.workout_id),
            workout_title: row.workout_title,
            workout_type: row.workout_type.parse::<WorkoutType>()?,
            scheduled_at: row.scheduled_at,
            completed: row.completed,
            updated_at: row.updated_at,
        })
    }
}

fn into_scheduled(rows: Vec<ScheduledWorkoutRow>) -> Result<Vec<ScheduledWorkout>, CoreError> {
    rows.into_iter().map(ScheduledWorkout::try_from).collect()
}

// TIMESTAMPTZ cannot hold instants before 4713 BC.
fn clamp_to_postgres(instant: &DateTime<Utc>) -> DateTime<Utc> {
    let earliest = NaiveDate::from_ymd_opt(1, 1, 1)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    (*instant).max(earliest)
}

#[derive(Clone)]
pub struct PostgresScheduledWorkoutRepository {
    pool: PgPool,
}

impl PostgresScheduledWorkoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ScheduledWorkoutRepository for PostgresScheduledWorkoutRepository {
    async fn insert(
        &self,
        input: InsertScheduledWorkoutInput,
    ) -> Result<ScheduledWorkout, CoreError> {
        let row = sqlx::query_as::<_, ScheduledWorkoutRow>(&format!(
            r#"
            WITH uw AS (
                INSERT INTO user_has_workouts (user_id, workout_id, scheduled_at, completed)
                VALUES ($1, $2, $3, FALSE)
                RETURNING *
            )
            {SELECT_SCHEDULED}
            FROM uw
            JOIN workouts w ON w.id = uw.workout_id
            "#
        ))
        .bind(input.user_id.0)
        .bind(input.workout_id.0)
        .bind(input.scheduled_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn insert_many(
        &self,
        user_id: &UserId,
        workout_id: &WorkoutId,
        instants: &[DateTime<Utc>],
    ) -> Result<Vec<ScheduledWorkoutId>, CoreError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(instants.len());

        for instant in instants {
            let id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO user_has_workouts (user_id, workout_id, scheduled_at, completed)
                VALUES ($1, $2, $3, FALSE)
                RETURNING id
                "#,
            )
            .bind(user_id.0)
            .bind(workout_id.0)
            .bind(*instant)
            .fetch_one(&mut *tx)
            .await?;
            ids.push(ScheduledWorkoutId(id));
        }

        tx.commit().await?;

        Ok(ids)
    }

    async fn find_by_id(
        &self,
        id: &ScheduledWorkoutId,
    ) -> Result<Option<ScheduledWorkout>, CoreError> {
        let row = sqlx::query_as::<_, ScheduledWorkoutRow>(&format!(
            r#"
            {SELECT_SCHEDULED}
            FROM user_has_workouts uw
            JOIN workouts w ON w.id = uw.workout_id
            WHERE uw.id = $1
            "#
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ScheduledWorkout::try_from).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<ScheduledWorkout>, CoreError> {
        let rows = sqlx::query_as::<_, ScheduledWorkoutRow>(&format!(
            r#"
            {SELECT_SCHEDULED}
            FROM user_has_workouts uw
            JOIN workouts w ON w.id = uw.workout_id
            WHERE uw.user_id = $1
            ORDER BY uw.scheduled_at, uw.id
            "#
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await?;

        into_scheduled(rows)
    }

    async fn list_by_user_between(
        &self,
        user_id: &UserId,
        window: &DateWindow,
    ) -> Result<Vec<ScheduledWorkout>, CoreError> {
        let rows = sqlx::query_as::<_, ScheduledWorkoutRow>(&format!(
            r#"
            {SELECT_SCHEDULED}
            FROM user_has_workouts uw
            JOIN workouts w ON w.id = uw.workout_id
            WHERE uw.user_id = $1 AND uw.scheduled_at BETWEEN $2 AND $3
            ORDER BY uw.scheduled_at, uw.id
            "#
        ))
        .bind(user_id.0)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        into_scheduled(rows)
    }

    async fn list_by_user_after(
        &self,
        user_id: &UserId,
        after: &DateTime<Utc>,
    ) -> Result<Vec<ScheduledWorkout>, CoreError> {
        let rows = sqlx::query_as::<_, ScheduledWorkoutRow>(&format!(
            r#"
            {SELECT_SCHEDULED}
            FROM user_has_workouts uw
            JOIN workouts w ON w.id = uw.workout_id
            WHERE uw.user_id = $1 AND uw.scheduled_at > $2
            ORDER BY uw.scheduled_at, uw.id
            "#
        ))
        .bind(user_id.0)
        .bind(clamp_to_postgres(after))
        .fetch_all(&self.pool)
        .await?;

        into_scheduled(rows)
    }

    async fn update(
        &self,
        input: UpdateScheduledWorkoutInput,
    ) -> Result<ScheduledWorkout, CoreError> {
        let row = sqlx::query_as::<_, ScheduledWorkoutRow>(&format!(
            r#"
            WITH uw AS (
                UPDATE user_has_workouts
                SET scheduled_at = COALESCE($2, scheduled_at),
                    completed = COALESCE($3, completed),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            {SELECT_SCHEDULED}
            FROM uw
            JOIN workouts w ON w.id = uw.workout_id
            "#
        ))
        .bind(input.id.0)
        .bind(input.scheduled_at)
        .bind(input.completed)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CoreError::ScheduledWorkoutNotFound { id: input.id })?;

        row.try_into()
    }

    async fn delete(&self, id: &ScheduledWorkoutId) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM user_has_workouts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::ScheduledWorkoutNotFound { id: *id });
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct RecurringWorkoutRow {
    id: i64,
    user_id: i64,
    workout_id: i64,
    time_of_day: NaiveTime,
    days_of_week: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RecurringWorkoutRow> for RecurringWorkout {
    type Error = CoreError;

    fn try_from(row: RecurringWorkoutRow) -> Result<Self, Self::Error> {
        let mut days_of_week = row
            .days_of_week
            .iter()
            .map(|day| day.parse::<DayOfWeek>())
            .collect::<Result<Vec<_>, _>>()?;
        days_of_week.sort();

        Ok(RecurringWorkout {
            id: RecurringWorkoutId(row.id),
            user_id: UserId(row.user_id),
            workout_id: WorkoutId(row.workout_id),
            time_of_day: row.time_of_day,
            days_of_week,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PostgresRecurringWorkoutRepository {
    pool: PgPool,
}

impl PostgresRecurringWorkoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RecurringWorkoutRepository for PostgresRecurringWorkoutRepository {
    async fn insert(
        &self,
        input: InsertRecurringWorkoutInput,
    ) -> Result<RecurringWorkout, CoreError> {
        let mut days_of_week = input.days_of_week;
        days_of_week.sort();
        days_of_week.dedup();

        let mut tx = self.pool.begin().await?;

        let (id, created_at, updated_at) =
            sqlx::query_as::<_, (i64, DateTime<Utc>, DateTime<Utc>)>(
                r#"
                INSERT INTO recurring_workouts (user_id, workout_id, time_of_day)
                VALUES ($1, $2, $3)
                RETURNING id, created_at, updated_at
                "#,
            )
            .bind(input.user_id.0)
            .bind(input.workout_id.0)
            .bind(input.time_of_day)
            .fetch_one(&mut *tx)
            .await?;

        for day in &days_of_week {
            sqlx::query(
                r#"
                INSERT INTO recurring_workout_days (recurring_workout_id, day_of_week)
                VALUES ($1, $2)
                "#,
            )
            .bind(id)
            .bind(day.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(RecurringWorkout {
            id: RecurringWorkoutId(id),
            user_id: input.user_id,
            workout_id: input.workout_id,
            time_of_day: input.time_of_day,
            days_of_week,
            created_at,
            updated_at,
        })
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<RecurringWorkout>, CoreError> {
        let rows = sqlx::query_as::<_, RecurringWorkoutRow>(
            r#"
            SELECT rw.id, rw.user_id, rw.workout_id, rw.time_of_day,
                   COALESCE(
                       array_agg(d.day_of_week) FILTER (WHERE d.day_of_week IS NOT NULL),
                       '{}'
                   ) AS days_of_week,
                   rw.created_at, rw.updated_at
            FROM recurring_workouts rw
            LEFT JOIN recurring_workout_days d ON d.recurring_workout_id = rw.id
            WHERE rw.user_id = $1
            GROUP BY rw.id
            ORDER BY rw.id
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RecurringWorkout::try_from).collect()
    }

    async fn delete(&self, id: &RecurringWorkoutId) -> Result<(), CoreError> {
        sqlx::query("DELETE FROM recurring_workouts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
