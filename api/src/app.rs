use std::future::IntoFuture;

use axum::Router;
use healthhub_core::create_repositories;
use sqlx::postgres::PgConnectOptions;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    config::Config,
    http::{
        auth::routes::auth_routes,
        exercises::routes::exercise_routes,
        health::routes::health_routes,
        schedules::routes::schedule_routes,
        server::{ApiError, AppState, api_error::ErrorBody},
        users::routes::user_routes,
        workouts::routes::workout_routes,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HealthHub API",
        description = "Users, workouts, exercises and workout scheduling"
    ),
    tags(
        (name = "auth", description = "Signup and the cookie-based login stub"),
        (name = "users", description = "User accounts"),
        (name = "schedule", description = "Scheduled and recurring workouts, statistics"),
        (name = "workouts", description = "Workout templates and their exercises"),
        (name = "exercises", description = "Exercise catalogue")
    ),
    components(schemas(ErrorBody))
)]
pub struct ApiDoc;

/// Builds the public API router, including the OpenAPI document served at
/// `/scalar`.
pub fn api_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(schedule_routes())
        .merge(workout_routes())
        .merge(exercise_routes())
        .split_for_parts();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
        .with_state(state)
}

pub fn health_router(state: AppState) -> Router {
    health_routes().with_state(state)
}

pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    pub async fn new(config: Config) -> Result<Self, ApiError> {
        let options = PgConnectOptions::from(&config.database);
        let repositories = create_repositories(options, config.database.max_connections)
            .await
            .map_err(|e| ApiError::StartupError { msg: e.to_string() })?;
        info!(
            host = %config.database.host,
            database = %config.database.db_name,
            "connected to the database and applied migrations"
        );

        Ok(Self {
            config,
            state: AppState::from(repositories),
        })
    }

    pub async fn start(&self) -> Result<(), ApiError> {
        let api_addr = format!("0.0.0.0:{}", self.config.server.api_port);
        let health_addr = format!("0.0.0.0:{}", self.config.server.health_port);

        let api_listener = TcpListener::bind(&api_addr)
            .await
            .map_err(|e| ApiError::StartupError {
                msg: format!("failed to bind {api_addr}: {e}"),
            })?;
        let health_listener =
            TcpListener::bind(&health_addr)
                .await
                .map_err(|e| ApiError::StartupError {
                    msg: format!("failed to bind {health_addr}: {e}"),
                })?;

        info!(%api_addr, %health_addr, environment = ?self.config.environment, "listening");

        let api_server = axum::serve(api_listener, api_router(self.state.clone()))
            .with_graceful_shutdown(shutdown_signal())
            .into_future();
        let health_server = axum::serve(health_listener, health_router(self.state.clone()))
            .with_graceful_shutdown(shutdown_signal())
            .into_future();

        let result = tokio::try_join!(api_server, health_server);

        info!("shutting down, closing the database pool");
        self.state.shutdown().await;

        result
            .map(|_| ())
            .map_err(|e| ApiError::StartupError { msg: e.to_string() })
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for the shutdown signal");
    }
}
