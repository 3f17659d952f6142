//! Extractors whose rejections answer with the JSON error body.

use axum::{
    Json,
    extract::{Path, Query},
};
use axum_extra::extract::WithRejection;

use crate::http::server::ApiError;

pub type ApiPath<T> = WithRejection<Path<T>, ApiError>;
pub type ApiQuery<T> = WithRejection<Query<T>, ApiError>;
pub type ApiJson<T> = WithRejection<Json<T>, ApiError>;
