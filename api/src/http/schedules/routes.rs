use utoipa_axum::{router::OpenApiRouter, routes};

use crate::http::{
    schedules::handlers::{
        __path_delete_scheduled_workout, __path_list_scheduled_workouts,
        __path_recurring_workouts, __path_schedule_recurring_workout, __path_schedule_workout,
        __path_scheduled_workouts_for_date, __path_scheduled_workouts_for_week,
        __path_update_scheduled_workout, __path_workout_completion, __path_workout_favourite,
        delete_scheduled_workout, list_scheduled_workouts, recurring_workouts,
        schedule_recurring_workout, schedule_workout, scheduled_workouts_for_date,
        scheduled_workouts_for_week, update_scheduled_workout, workout_completion,
        workout_favourite,
    },
    server::AppState,
};

pub fn schedule_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_scheduled_workouts))
        .routes(routes!(scheduled_workouts_for_date))
        .routes(routes!(scheduled_workouts_for_week))
        .routes(routes!(recurring_workouts))
        .routes(routes!(workout_completion))
        .routes(routes!(workout_favourite))
        .routes(routes!(schedule_workout))
        .routes(routes!(schedule_recurring_workout))
        .routes(routes!(update_scheduled_workout))
        .routes(routes!(delete_scheduled_workout))
}
