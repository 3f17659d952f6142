use axum::extract::State;
use healthhub_core::domain::health::{entities::IsHealthy, port::HealthService};

use crate::http::server::{ApiError, AppState, Response};

pub mod routes;

/// Liveness probe, served on the dedicated health port. Answers 503 when the
/// database does not respond.
pub async fn health_check(State(state): State<AppState>) -> Result<Response<IsHealthy>, ApiError> {
    let status = state.service.check_health().await?;
    Ok(Response::ok(status))
}
