use utoipa_axum::{router::OpenApiRouter, routes};

use crate::http::{
    server::AppState,
    users::handlers::{
        __path_create_user, __path_get_user, __path_list_user_workouts, __path_list_users,
        __path_update_user, create_user, get_user, list_user_workouts, list_users, update_user,
    },
};

pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users))
        .routes(routes!(get_user))
        .routes(routes!(create_user))
        .routes(routes!(update_user))
        .routes(routes!(list_user_workouts))
}
