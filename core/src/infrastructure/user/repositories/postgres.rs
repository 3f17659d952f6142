use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{
    common::CoreError,
    user::{
        entities::{InsertUserInput, UpdateUserInput, User, UserId},
        ports::UserRepository,
    },
};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.id),
            username: row.username,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn username_conflict(error: sqlx::Error, username: &str) -> CoreError {
    let unique_violation = error
        .as_database_error()
        .is_some_and(|db_error| db_error.is_unique_violation());

    if unique_violation {
        CoreError::UsernameTaken {
            username: username.to_string(),
        }
    } else {
        CoreError::from(error)
    }
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PostgresUserRepository {
    async fn insert(&self, input: InsertUserInput) -> Result<User, CoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username)
            VALUES ($1)
            RETURNING id, username, created_at, updated_at
            "#,
        )
        .bind(&input.username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| username_conflict(e, &input.username))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, CoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, CoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list(&self) -> Result<Vec<User>, CoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, input: UpdateUserInput) -> Result<User, CoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, created_at, updated_at
            "#,
        )
        .bind(input.id.0)
        .bind(input.username.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| username_conflict(e, input.username.as_deref().unwrap_or_default()))?;

        row.map(User::from)
            .ok_or(CoreError::UserNotFound { id: input.id })
    }
}
