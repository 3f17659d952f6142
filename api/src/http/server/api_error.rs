use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use healthhub_core::domain::common::CoreError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error_code: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Service unavailable")]
    ServiceUnavailable,

    #[error("Internal server error")]
    InternalServerError,

    #[error("Failed to start the service: {msg}")]
    StartupError { msg: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError | ApiError::StartupError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::Conflict { .. } => "CONFLICT",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ApiError::InternalServerError | ApiError::StartupError { .. } => {
                "INTERNAL_SERVER_ERROR"
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::UserNotFound { .. }
            | CoreError::WorkoutNotFound { .. }
            | CoreError::ExerciseNotFound { .. }
            | CoreError::ScheduledWorkoutNotFound { .. }
            | CoreError::WorkoutExerciseNotFound { .. } => ApiError::NotFound {
                message: error.to_string(),
            },
            CoreError::UsernameTaken { .. } => ApiError::Conflict {
                message: error.to_string(),
            },
            CoreError::InvalidUsername
            | CoreError::InvalidWorkoutTitle
            | CoreError::InvalidExerciseTitle
            | CoreError::MissingPassword
            | CoreError::EmptyRecurringDays
            | CoreError::InvalidLookback { .. } => ApiError::BadRequest {
                message: error.to_string(),
            },
            CoreError::InvalidCredentials => ApiError::Unauthorized,
            CoreError::Unhealthy | CoreError::ServiceUnavailable(_) => {
                tracing::warn!(error = %error, "service unavailable");
                ApiError::ServiceUnavailable
            }
            CoreError::DatabaseError { .. } | CoreError::UnknownError { .. } => {
                tracing::error!(error = %error, "unexpected error while handling request");
                ApiError::InternalServerError
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error_code: self.error_code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
