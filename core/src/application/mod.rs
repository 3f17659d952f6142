use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::{
    domain::common::{CoreError, services::Service},
    infrastructure::{
        exercise::repositories::postgres::PostgresExerciseRepository,
        health::repositories::postgres::PostgresHealthRepository,
        schedule::repositories::postgres::{
            PostgresRecurringWorkoutRepository, PostgresScheduledWorkoutRepository,
        },
        user::repositories::postgres::PostgresUserRepository,
        workout::repositories::postgres::PostgresWorkoutRepository,
    },
};

/// Concrete service type backed by PostgreSQL repositories.
pub type HealthHubService = Service<
    PostgresUserRepository,
    PostgresWorkoutRepository,
    PostgresExerciseRepository,
    PostgresScheduledWorkoutRepository,
    PostgresRecurringWorkoutRepository,
    PostgresHealthRepository,
>;

#[derive(Clone)]
pub struct HealthHubRepositories {
    pool: PgPool,
    pub user_repository: PostgresUserRepository,
    pub workout_repository: PostgresWorkoutRepository,
    pub exercise_repository: PostgresExerciseRepository,
    pub scheduled_workout_repository: PostgresScheduledWorkoutRepository,
    pub recurring_workout_repository: PostgresRecurringWorkoutRepository,
    pub health_repository: PostgresHealthRepository,
}

/// Connects to PostgreSQL, applies pending migrations and builds every
/// repository on top of a shared pool.
pub async fn create_repositories(
    pg_connection_options: PgConnectOptions,
    max_connections: u32,
) -> Result<HealthHubRepositories, CoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(pg_connection_options)
        .await
        .map_err(|e| CoreError::ServiceUnavailable(e.to_string()))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;

    Ok(HealthHubRepositories::from_pool(pool))
}

impl HealthHubRepositories {
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            user_repository: PostgresUserRepository::new(pool.clone()),
            workout_repository: PostgresWorkoutRepository::new(pool.clone()),
            exercise_repository: PostgresExerciseRepository::new(pool.clone()),
            scheduled_workout_repository: PostgresScheduledWorkoutRepository::new(pool.clone()),
            recurring_workout_repository: PostgresRecurringWorkoutRepository::new(pool.clone()),
            health_repository: PostgresHealthRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn shutdown_pool(&self) {
        self.pool.close().await;
    }
}

impl From<HealthHubRepositories> for HealthHubService {
    fn from(repositories: HealthHubRepositories) -> Self {
        Service::new(
            repositories.user_repository,
            repositories.workout_repository,
            repositories.exercise_repository,
            repositories.scheduled_workout_repository,
            repositories.recurring_workout_repository,
            repositories.health_repository,
        )
    }
}

impl HealthHubService {
    pub async fn shutdown_pool(&self) {
        self.health_repository.pool.close().await;
    }
}
