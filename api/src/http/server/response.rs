use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// Successful JSON response with an explicit status code.
#[derive(Debug)]
pub struct Response<T: Serialize> {
    status: StatusCode,
    data: T,
}

impl<T: Serialize> Response<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Response<()> {
    /// 204 with an empty body.
    pub fn deleted(_: ()) -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            data: (),
        }
    }
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }
        (self.status, Json(self.data)).into_response()
    }
}
