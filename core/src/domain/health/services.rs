use crate::domain::{
    common::{CoreError, services::Service},
    exercise::ports::ExerciseRepository,
    health::{
        entities::IsHealthy,
        port::{HealthRepository, HealthService},
    },
    schedule::ports::{RecurringWorkoutRepository, ScheduledWorkoutRepository},
    user::ports::UserRepository,
    workout::ports::WorkoutRepository,
};

impl<U, W, E, S, R, H> HealthService for Service<U, W, E, S, R, H>
where
    U: UserRepository,
    W: WorkoutRepository,
    E: ExerciseRepository,
    S: ScheduledWorkoutRepository,
    R: RecurringWorkoutRepository,
    H: HealthRepository,
{
    async fn check_health(&self) -> Result<IsHealthy, CoreError> {
        self.health_repository.ping().await.to_result()
    }
}
