use crate::domain::{
    common::{CoreError, services::Service},
    exercise::{
        entities::{Exercise, ExerciseId, InsertExerciseInput, MuscleGroup},
        ports::{ExerciseRepository, ExerciseService},
    },
    health::port::HealthRepository,
    schedule::ports::{RecurringWorkoutRepository, ScheduledWorkoutRepository},
    user::ports::UserRepository,
    workout::ports::WorkoutRepository,
};

impl<U, W, E, S, R, H> ExerciseService for Service<U, W, E, S, R, H>
where
    U: UserRepository,
    W: WorkoutRepository,
    E: ExerciseRepository,
    S: ScheduledWorkoutRepository,
    R: RecurringWorkoutRepository,
    H: HealthRepository,
{
    async fn get_exercise(&self, id: &ExerciseId) -> Result<Exercise, CoreError> {
        self.exercise_repository
            .find_by_id(id)
            .await?
            .ok_or(CoreError::ExerciseNotFound { id: *id })
    }

    async fn list_exercises(&self) -> Result<Vec<Exercise>, CoreError> {
        self.exercise_repository.list().await
    }

    fn muscle_groups(&self) -> Vec<MuscleGroup> {
        MuscleGroup::ALL.to_vec()
    }

    async fn list_by_muscle_group(
        &self,
        muscle_group: MuscleGroup,
    ) -> Result<Vec<Exercise>, CoreError> {
        self.exercise_repository
            .list_by_muscle_group(muscle_group)
            .await
    }

    async fn search_by_title(&self, title: &str) -> Result<Vec<Exercise>, CoreError> {
        self.exercise_repository.search_by_title(title.trim()).await
    }

    async fn create_exercise(&self, mut input: InsertExerciseInput) -> Result<Exercise, CoreError> {
        if input.title.trim().is_empty() {
            return Err(CoreError::InvalidExerciseTitle);
        }

        input.muscle_groups.sort();
        input.muscle_groups.dedup();

        self.exercise_repository.insert(input).await
    }
}
