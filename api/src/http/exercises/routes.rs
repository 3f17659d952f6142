use utoipa_axum::{router::OpenApiRouter, routes};

use crate::http::{
    exercises::handlers::{
        __path_create_exercise, __path_get_exercise, __path_list_by_muscle_group,
        __path_list_exercises, __path_muscle_groups, __path_search_by_title, create_exercise,
        get_exercise, list_by_muscle_group, list_exercises, muscle_groups, search_by_title,
    },
    server::AppState,
};

pub fn exercise_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_exercises))
        .routes(routes!(get_exercise))
        .routes(routes!(muscle_groups))
        .routes(routes!(list_by_muscle_group))
        .routes(routes!(search_by_title))
        .routes(routes!(create_exercise))
}
