use axum::{Json, extract::State};
use axum_extra::extract::{
    WithRejection,
    cookie::{Cookie, CookieJar},
};
use healthhub_core::domain::user::{
    entities::{Credentials, UserId},
    ports::UserService,
};
use tracing::{info, warn};

use crate::http::server::{ApiError, ApiJson, AppState, Response};

const USER_COOKIE: &str = "user";
const USER_ID_COOKIE: &str = "user_id";

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "User signed up, returns the new user id", body = i64),
        (status = 400, description = "Bad request - Missing password or blank username"),
        (status = 409, description = "Username already taken"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state, credentials), fields(username = %credentials.username))]
pub async fn signup(
    State(state): State<AppState>,
    WithRejection(Json(credentials), _): ApiJson<Credentials>,
) -> Result<Response<UserId>, ApiError> {
    let user = state.service.signup(credentials).await?;
    Ok(Response::created(user.id))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Login succeeded, returns the user id and sets the user_id cookie", body = i64),
        (status = 401, description = "Authentication failed"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state, jar, credentials), fields(username = %credentials.username))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(credentials), _): ApiJson<Credentials>,
) -> Result<(CookieJar, Response<UserId>), ApiError> {
    let user = state.service.login(credentials).await?;

    let cookie = Cookie::build((USER_ID_COOKIE, user.id.to_string()))
        .path("/")
        .http_only(true);
    info!(user_id = %user.id, "user logged in");

    Ok((jar.add(cookie), Response::ok(user.id)))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookies expired", body = String),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Response<String>), ApiError> {
    let user_id = jar
        .get(USER_ID_COOKIE)
        .and_then(|cookie| cookie.value().parse::<i64>().ok())
        .map(UserId);

    // A stale cookie must not prevent clearing it
    if let Some(user_id) = user_id {
        if let Err(e) = state.service.logout(&user_id).await {
            warn!(%user_id, error = %e, "logout for unknown user");
        }
    }

    let jar = jar
        .remove(Cookie::build(USER_COOKIE).path("/"))
        .remove(Cookie::build(USER_ID_COOKIE).path("/"));

    Ok((jar, Response::ok("You've been logged out".to_string())))
}
