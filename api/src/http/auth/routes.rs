use utoipa_axum::{router::OpenApiRouter, routes};

use crate::http::{
    auth::handlers::{__path_login, __path_logout, __path_signup, login, logout, signup},
    server::AppState,
};

pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(signup))
        .routes(routes!(login))
        .routes(routes!(logout))
}
