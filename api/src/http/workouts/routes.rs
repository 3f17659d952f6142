use utoipa_axum::{router::OpenApiRouter, routes};

use crate::http::{
    server::AppState,
    workouts::handlers::{
        __path_create_workout, __path_delete_workout, __path_delete_workout_exercise,
        __path_get_workout, __path_list_workouts, __path_list_workouts_by_type,
        __path_list_workouts_by_user, __path_update_workout, __path_workout_types,
        create_workout, delete_workout, delete_workout_exercise, get_workout, list_workouts,
        list_workouts_by_type, list_workouts_by_user, update_workout, workout_types,
    },
};

pub fn workout_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_workouts))
        .routes(routes!(get_workout))
        .routes(routes!(list_workouts_by_user))
        .routes(routes!(list_workouts_by_type))
        .routes(routes!(workout_types))
        .routes(routes!(create_workout))
        .routes(routes!(update_workout))
        .routes(routes!(delete_workout_exercise))
        .routes(routes!(delete_workout))
}
