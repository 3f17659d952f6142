use crate::domain::{
    exercise::ports::ExerciseRepository,
    health::port::HealthRepository,
    schedule::ports::{RecurringWorkoutRepository, ScheduledWorkoutRepository},
    user::ports::UserRepository,
    workout::ports::WorkoutRepository,
};

#[derive(Clone)]
pub struct Service<U, W, E, S, R, H>
where
    U: UserRepository,
    W: WorkoutRepository,
    E: ExerciseRepository,
    S: ScheduledWorkoutRepository,
    R: RecurringWorkoutRepository,
    H: HealthRepository,
{
    pub(crate) user_repository: U,
    pub(crate) workout_repository: W,
    pub(crate) exercise_repository: E,
    pub(crate) scheduled_workout_repository: S,
    pub(crate) recurring_workout_repository: R,
    pub(crate) health_repository: H,
}

impl<U, W, E, S, R, H> Service<U, W, E, S, R, H>
where
    U: UserRepository,
    W: WorkoutRepository,
    E: ExerciseRepository,
    S: ScheduledWorkoutRepository,
    R: RecurringWorkoutRepository,
    H: HealthRepository,
{
    pub fn new(
        user_repository: U,
        workout_repository: W,
        exercise_repository: E,
        scheduled_workout_repository: S,
        recurring_workout_repository: R,
        health_repository: H,
    ) -> Self {
        Self {
            user_repository,
            workout_repository,
            exercise_repository,
            scheduled_workout_repository,
            recurring_workout_repository,
            health_repository,
        }
    }
}
