use sqlx::PgPool;

use crate::domain::{
    common::CoreError,
    exercise::{
        entities::{Exercise, ExerciseDifficulty, ExerciseId, InsertExerciseInput, MuscleGroup},
        ports::ExerciseRepository,
    },
};

const SELECT_EXERCISES: &str = r#"
    SELECT e.id, e.title, e.description, e.exercise_difficulty, e.video_guide,
           COALESCE(
               array_agg(mg.muscle_group) FILTER (WHERE mg.muscle_group IS NOT NULL),
               '{}'
           ) AS muscle_groups
    FROM exercises e
    LEFT JOIN exercise_muscle_groups mg ON mg.exercise_id = e.id
"#;

#[derive(sqlx::FromRow)]
struct ExerciseRow {
    id: i64,
    title: String,
    description: Option<String>,
    exercise_difficulty: Option<String>,
    video_guide: Option<String>,
    muscle_groups: Vec<String>,
}

impl TryFrom<ExerciseRow> for Exercise {
    type Error = CoreError;

    fn try_from(row: ExerciseRow) -> Result<Self, Self::Error> {
        let mut muscle_groups = row
            .muscle_groups
            .iter()
            .map(|group| group.parse::<MuscleGroup>())
            .collect::<Result<Vec<_>, _>>()?;
        muscle_groups.sort();

        Ok(Exercise {
            id: ExerciseId(row.id),
            title: row.title,
            description: row.description,
            exercise_difficulty: row
                .exercise_difficulty
                .as_deref()
                .map(str::parse::<ExerciseDifficulty>)
                .transpose()?,
            video_guide: row.video_guide,
            muscle_groups,
        })
    }
}

fn into_exercises(rows: Vec<ExerciseRow>) -> Result<Vec<Exercise>, CoreError> {
    rows.into_iter().map(Exercise::try_from).collect()
}

#[derive(Clone)]
pub struct PostgresExerciseRepository {
    pool: PgPool,
}

impl PostgresExerciseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ExerciseRepository for PostgresExerciseRepository {
    async fn insert(&self, input: InsertExerciseInput) -> Result<Exercise, CoreError> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO exercises (title, description, exercise_difficulty, video_guide)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(input.description.as_deref())
        .bind(input.exercise_difficulty.map(|d| d.as_str()))
        .bind(input.video_guide.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        for group in &input.muscle_groups {
            sqlx::query(
                r#"
                INSERT INTO exercise_muscle_groups (exercise_id, muscle_group)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(id)
            .bind(group.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Exercise {
            id: ExerciseId(id),
            title: input.title,
            description: input.description,
            exercise_difficulty: input.exercise_difficulty,
            video_guide: input.video_guide,
            muscle_groups: input.muscle_groups,
        })
    }

    async fn find_by_id(&self, id: &ExerciseId) -> Result<Option<Exercise>, CoreError> {
        let query = format!("{SELECT_EXERCISES} WHERE e.id = $1 GROUP BY e.id");

        let row = sqlx::query_as::<_, ExerciseRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Exercise::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[ExerciseId]) -> Result<Vec<Exercise>, CoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = ids.iter().map(|id| id.0).collect();
        let query = format!("{SELECT_EXERCISES} WHERE e.id = ANY($1) GROUP BY e.id ORDER BY e.id");

        let rows = sqlx::query_as::<_, ExerciseRow>(&query)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

        into_exercises(rows)
    }

    async fn list(&self) -> Result<Vec<Exercise>, CoreError> {
        let query = format!("{SELECT_EXERCISES} GROUP BY e.id ORDER BY e.id");

        let rows = sqlx::query_as::<_, ExerciseRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        into_exercises(rows)
    }

    async fn list_by_muscle_group(
        &self,
        muscle_group: MuscleGroup,
    ) -> Result<Vec<Exercise>, CoreError> {
        // Filter through a sub-select so the aggregated list keeps every group.
        let query = format!(
            "{SELECT_EXERCISES}
            WHERE e.id IN (SELECT exercise_id FROM exercise_muscle_groups WHERE muscle_group = $1)
            GROUP BY e.id
            ORDER BY e.id"
        );

        let rows = sqlx::query_as::<_, ExerciseRow>(&query)
            .bind(muscle_group.as_str())
            .fetch_all(&self.pool)
            .await?;

        into_exercises(rows)
    }

    async fn search_by_title(&self, title: &str) -> Result<Vec<Exercise>, CoreError> {
        let query = format!(
            "{SELECT_EXERCISES}
            WHERE strpos(lower(e.title), lower($1)) > 0
            GROUP BY e.id
            ORDER BY e.id"
        );

        let rows = sqlx::query_as::<_, ExerciseRow>(&query)
            .bind(title)
            .fetch_all(&self.pool)
            .await?;

        into_exercises(rows)
    }
}
